#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
}

impl View {
    pub fn name(&self) -> &'static str {
        match self {
            View::Login => "login",
        }
    }
}

/// Host routing collaborator.
pub trait Navigator: Send + Sync {
    fn go(&self, view: View);
}
