#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelInfo {
    pub name: String,
    #[allow(dead_code)]
    pub color: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IssueSummary {
    pub number: u64,
    pub title: String,
}

#[derive(Clone, Debug, Default)]
pub struct IssuePage {
    pub issues: Vec<IssueSummary>,
    pub has_next: bool,
}

/// The issue a reconciliation pass works on.
#[derive(Clone, Debug)]
pub struct IssueRef {
    pub owner: String,
    pub repo: String,
    pub number: u64,
    pub title: String,
}

impl IssueRef {
    pub fn new(owner: &str, repo: &str, number: u64, title: &str) -> Self {
        Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            number,
            title: title.to_string(),
        }
    }

    pub fn full_repo(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}
