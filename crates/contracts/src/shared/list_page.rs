use serde::Deserialize;

/// The two shapes a list endpoint may answer with.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged, bound(deserialize = "T: Deserialize<'de>"))]
pub enum ListResponse<T> {
    Bare(Vec<T>),
    Paged {
        #[serde(default)]
        results: Option<Vec<T>>,
        #[serde(default)]
        count: Option<usize>,
        #[serde(default)]
        total: Option<usize>,
    },
}

/// One page of records and the server-reported total.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }
}

impl<T> From<ListResponse<T>> for Page<T> {
    fn from(response: ListResponse<T>) -> Self {
        match response {
            ListResponse::Bare(items) => Page {
                total: items.len(),
                items,
            },
            ListResponse::Paged {
                results,
                count,
                total,
            } => {
                let items = results.unwrap_or_default();
                Page {
                    total: count.or(total).unwrap_or(items.len()),
                    items,
                }
            }
        }
    }
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page(value: serde_json::Value) -> Page<u32> {
        serde_json::from_value::<ListResponse<u32>>(value)
            .unwrap()
            .into()
    }

    #[test]
    fn bare_array_total_is_its_length() {
        let page = page(json!([1, 2, 3, 4, 5, 6, 7]));
        assert_eq!(page.total, 7);
        assert_eq!(page.items.len(), 7);
    }

    #[test]
    fn envelope_count_is_authoritative() {
        let page = page(json!({"results": [1, 2, 3], "count": 42}));
        assert_eq!(page.total, 42);
        assert_eq!(page.items, vec![1, 2, 3]);
    }

    #[test]
    fn total_is_used_when_count_is_missing() {
        assert_eq!(page(json!({"results": [1], "total": 9})).total, 9);
    }

    #[test]
    fn missing_results_yield_an_empty_page() {
        let page = page(json!({"count": 0}));
        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);
    }
}
