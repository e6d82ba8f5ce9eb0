#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AssetKind {
    Project,
    Client,
}

impl AssetKind {
    pub const ALL: [Self; 2] = [Self::Project, Self::Client];

    /// Prefix of every generated asset name.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Client => "client",
        }
    }

    /// Directory under the storage root, also the URL segment under `/uploads`.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Project => "projects",
            Self::Client => "clients",
        }
    }
}
