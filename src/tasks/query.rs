use crate::error::ApiError;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// Validated pagination window. `page` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
}

impl Pagination {
    pub fn from_query(page: Option<i64>, limit: Option<i64>) -> Result<Self, ApiError> {
        let page = page.unwrap_or(DEFAULT_PAGE);
        let limit = limit.unwrap_or(DEFAULT_LIMIT);
        if page < 1 {
            return Err(ApiError::Validation("page must be at least 1".into()));
        }
        if limit < 1 {
            return Err(ApiError::Validation("limit must be at least 1".into()));
        }
        if limit > MAX_LIMIT {
            return Err(ApiError::Validation(format!(
                "limit must be at most {MAX_LIMIT}"
            )));
        }
        Ok(Self { page, limit })
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }

    pub fn total_pages(&self, total: i64) -> i64 {
        (total + self.limit - 1) / self.limit
    }
}

/// Fields a client may sort by, by their wire names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Task,
    TaskDate,
    Completed,
    CreatedAt,
    Slug,
}

impl SortField {
    fn from_wire(name: &str) -> Option<Self> {
        match name {
            "task" => Some(Self::Task),
            "taskDate" => Some(Self::TaskDate),
            "completed" => Some(Self::Completed),
            "createdAt" => Some(Self::CreatedAt),
            "slug" => Some(Self::Slug),
            _ => None,
        }
    }

    fn column(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::TaskDate => "task_date",
            Self::Completed => "completed",
            Self::CreatedAt => "created_at",
            Self::Slug => "slug",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: SortField,
    pub descending: bool,
}

/// Parses "a,-b,c" into ordered sort keys. A leading `-` means descending.
/// Unknown field names are rejected rather than passed through to SQL.
pub fn parse_sort(spec: &str) -> Result<Vec<SortKey>, ApiError> {
    let mut keys = Vec::new();
    for part in spec.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let (name, descending) = match part.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (part, false),
        };
        let field = SortField::from_wire(name)
            .ok_or_else(|| ApiError::Validation(format!("unknown sort field: {name}")))?;
        keys.push(SortKey { field, descending });
    }
    if keys.is_empty() {
        return Ok(default_sort());
    }
    Ok(keys)
}

/// Due date, most distant first.
pub fn default_sort() -> Vec<SortKey> {
    vec![SortKey {
        field: SortField::TaskDate,
        descending: true,
    }]
}

/// Renders an ORDER BY body from whitelisted columns only, with `id` as a
/// final tiebreak so equal keys paginate deterministically.
pub fn order_by_clause(keys: &[SortKey]) -> String {
    let mut clause = String::new();
    for key in keys {
        clause.push_str(key.field.column());
        clause.push_str(if key.descending { " DESC, " } else { " ASC, " });
    }
    clause.push_str("id ASC");
    clause
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults_apply() {
        let p = Pagination::from_query(None, None).unwrap();
        assert_eq!(p, Pagination { page: 1, limit: 10 });
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn pagination_offset_is_page_minus_one_times_limit() {
        let p = Pagination::from_query(Some(3), Some(5)).unwrap();
        assert_eq!(p.offset(), 10);
    }

    #[test]
    fn pagination_rejects_zero_and_negative() {
        assert!(Pagination::from_query(Some(0), None).is_err());
        assert!(Pagination::from_query(None, Some(0)).is_err());
        assert!(Pagination::from_query(Some(-1), Some(-1)).is_err());
    }

    #[test]
    fn pagination_rejects_oversized_limit() {
        assert!(Pagination::from_query(None, Some(MAX_LIMIT + 1)).is_err());
        assert!(Pagination::from_query(None, Some(MAX_LIMIT)).is_ok());
    }

    #[test]
    fn total_pages_rounds_up() {
        let p = Pagination::from_query(Some(1), Some(5)).unwrap();
        assert_eq!(p.total_pages(0), 0);
        assert_eq!(p.total_pages(5), 1);
        assert_eq!(p.total_pages(6), 2);
        assert_eq!(p.total_pages(11), 3);
    }

    #[test]
    fn parse_sort_single_ascending() {
        let keys = parse_sort("task").unwrap();
        assert_eq!(
            keys,
            vec![SortKey {
                field: SortField::Task,
                descending: false
            }]
        );
    }

    #[test]
    fn parse_sort_multi_key_with_signs() {
        let keys = parse_sort("-taskDate,task,completed").unwrap();
        assert_eq!(keys.len(), 3);
        assert!(keys[0].descending);
        assert_eq!(keys[0].field, SortField::TaskDate);
        assert!(!keys[1].descending);
        assert!(!keys[2].descending);
        assert_eq!(keys[2].field, SortField::Completed);
    }

    #[test]
    fn parse_sort_rejects_plus_prefix() {
        // Only `-` is part of the sort grammar; `+task` is not a field name.
        assert!(parse_sort("+task").is_err());
        assert!(parse_sort("-taskDate,+completed").is_err());
    }

    #[test]
    fn parse_sort_rejects_unknown_field() {
        let err = parse_sort("taskDate,password_hash").unwrap_err();
        assert!(err.to_string().contains("password_hash"));
    }

    #[test]
    fn parse_sort_empty_falls_back_to_default() {
        assert_eq!(parse_sort("").unwrap(), default_sort());
        assert_eq!(parse_sort(" , ").unwrap(), default_sort());
    }

    #[test]
    fn order_by_renders_columns_and_tiebreak() {
        let keys = parse_sort("-taskDate,task").unwrap();
        assert_eq!(order_by_clause(&keys), "task_date DESC, task ASC, id ASC");
        assert_eq!(order_by_clause(&default_sort()), "task_date DESC, id ASC");
    }
}
