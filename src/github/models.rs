use serde::{Deserialize, Serialize};

/// Subset of the GitHub repository payload the statistics are built from
#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub name: String,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub open_issues_count: u64,
    #[serde(default)]
    pub watchers_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoStats {
    pub name: String,
    pub stars: u64,
    pub forks: u64,
    pub open_issues: u64,
    pub watchers: u64,
}

impl From<Repository> for RepoStats {
    fn from(repo: Repository) -> Self {
        Self {
            name: repo.name,
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            open_issues: repo.open_issues_count,
            watchers: repo.watchers_count,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsTotals {
    pub repositories: usize,
    pub stars: u64,
    pub forks: u64,
    pub open_issues: u64,
    pub watchers: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrgStats {
    pub organization: String,
    pub repositories: Vec<RepoStats>,
    pub totals: StatsTotals,
}

impl OrgStats {
    pub fn new(organization: impl Into<String>, repositories: Vec<RepoStats>) -> Self {
        let totals: StatsTotals = repositories.iter().fold(
            StatsTotals { repositories: repositories.len(), ..Default::default() },
            |mut acc, r| {
                acc.stars += r.stars;
                acc.forks += r.forks;
                acc.open_issues += r.open_issues;
                acc.watchers += r.watchers;
                acc
            },
        );

        Self {
            organization: organization.into(),
            repositories,
            totals,
        }
    }
}
