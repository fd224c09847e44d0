use serde::Deserialize;

#[cfg(test)]
use crate::models::job::JobRow;

/// Index filters. Both terms are optional and combine with AND.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct JobSearch {
    #[serde(default, alias = "companySearchString")]
    pub company: Option<String>,
    #[serde(default, alias = "descriptionSearchString")]
    pub description: Option<String>,
}

impl JobSearch {
    /// Drops blank terms so they behave as if never supplied.
    pub fn normalized(self) -> Self {
        JobSearch {
            company: non_blank(self.company),
            description: non_blank(self.description),
        }
    }

    pub fn company_pattern(&self) -> Option<String> {
        self.company.as_deref().map(like_pattern)
    }

    pub fn description_pattern(&self) -> Option<String> {
        self.description.as_deref().map(like_pattern)
    }

    /// Same predicate as the SQL filter, evaluated in process.
    #[cfg(test)]
    pub fn matches(&self, job: &JobRow) -> bool {
        let company_ok = match &self.company {
            Some(term) => contains_ignore_case(&job.company, term),
            None => true,
        };
        let description_ok = match &self.description {
            Some(term) => job
                .description
                .as_deref()
                .is_some_and(|d| contains_ignore_case(d, term)),
            None => true,
        };
        company_ok && description_ok
    }
}

fn non_blank(term: Option<String>) -> Option<String> {
    term.filter(|t| !t.trim().is_empty())
}

#[cfg(test)]
fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// `%term%` for ILIKE, with the LIKE metacharacters escaped.
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
