/// Whether a document link has been processed before.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LinkStatus {
    New,
    Duplicate,
}

impl LinkStatus {
    pub fn as_str(&self) -> &str {
        match self {
            LinkStatus::New => "New",
            LinkStatus::Duplicate => "Duplicate",
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, LinkStatus::New)
    }
}
