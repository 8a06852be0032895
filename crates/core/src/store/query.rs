use review_portal_formula::Expr;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sort {
    pub field: String,
    pub direction: SortDirection,
}

/// A list request: one optional filter formula and one optional sort key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    pub filter: Option<Expr>,
    pub sort: Option<Sort>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, expr: Expr) -> Self {
        self.filter = Some(expr);
        self
    }

    pub fn sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort = Some(Sort {
            field: field.into(),
            direction,
        });
        self
    }

    /// Query-string pairs in the store's list-endpoint encoding.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(filter) = &self.filter {
            params.push(("filterByFormula".to_string(), filter.to_string()));
        }
        if let Some(sort) = &self.sort {
            params.push(("sort[0][field]".to_string(), sort.field.clone()));
            params.push((
                "sort[0][direction]".to_string(),
                sort.direction.as_str().to_string(),
            ));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_has_no_params() {
        assert!(ListQuery::new().to_params().is_empty());
    }

    #[test]
    fn filter_and_sort_params() {
        let query = ListQuery::new()
            .filter(Expr::field("Content Status").equals(Expr::string("Review")))
            .sort("Scheduled For", SortDirection::Asc);
        assert_eq!(
            query.to_params(),
            vec![
                (
                    "filterByFormula".to_string(),
                    r#"{Content Status} = "Review""#.to_string()
                ),
                ("sort[0][field]".to_string(), "Scheduled For".to_string()),
                ("sort[0][direction]".to_string(), "asc".to_string()),
            ]
        );
    }
}
