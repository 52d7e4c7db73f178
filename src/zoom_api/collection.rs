use crate::zoom_api::client::ApiResponse;
use crate::zoom_api::pagination::PaginationEnvelope;
use crate::zoom_api::records::{ListRecord, Record};
use serde_json::{json, Value};
use std::ops::Index;

/// One page of typed records from a Zoom list endpoint
///
/// Records keep the order the server returned them in. The collection is fully
/// materialized and immutable: [`filter`](Self::filter) and the domain helpers
/// built on it return a new collection that carries the *same* pagination
/// metadata as the source, because that metadata describes the server page and
/// not the filtered subset. Fetching further pages is up to the caller, using
/// [`next_page_token`](Self::next_page_token).
#[derive(Debug, Clone, PartialEq)]
pub struct PagedCollection<T> {
    items: Vec<T>,
    pagination: Option<PaginationEnvelope>,
}

impl<T> PagedCollection<T> {
    pub fn new(items: Vec<T>, pagination: Option<PaginationEnvelope>) -> Self {
        Self { items, pagination }
    }

    /// All records, in server order
    pub fn all(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_not_empty(&self) -> bool {
        !self.is_empty()
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn pagination(&self) -> Option<&PaginationEnvelope> {
        self.pagination.as_ref()
    }

    /// Pagination metadata with absent fields left as `None`
    pub fn pagination_info(&self) -> PaginationEnvelope {
        self.pagination.clone().unwrap_or_default()
    }

    pub fn page_count(&self) -> Option<u64> {
        self.pagination.as_ref().and_then(|p| p.page_count)
    }

    pub fn page_number(&self) -> Option<u64> {
        self.pagination.as_ref().and_then(|p| p.page_number)
    }

    pub fn page_size(&self) -> Option<u64> {
        self.pagination.as_ref().and_then(|p| p.page_size)
    }

    pub fn total_records(&self) -> Option<u64> {
        self.pagination.as_ref().and_then(|p| p.total_records)
    }

    pub fn next_page_token(&self) -> Option<&str> {
        self.pagination
            .as_ref()
            .and_then(|p| p.next_page_token.as_deref())
    }

    /// True iff the server returned a non-empty `next_page_token`
    pub fn has_more_pages(&self) -> bool {
        self.pagination
            .as_ref()
            .is_some_and(PaginationEnvelope::has_more_pages)
    }

    /// Keep the records matching `predicate`
    pub fn filter<F>(&self, mut predicate: F) -> Self
    where
        T: Clone,
        F: FnMut(&T) -> bool,
    {
        Self {
            items: self
                .items
                .iter()
                .filter(|item| predicate(item))
                .cloned()
                .collect(),
            pagination: self.pagination.clone(),
        }
    }

    /// Transform every record; the result no longer carries pagination
    pub fn map<R, F>(&self, f: F) -> Vec<R>
    where
        F: FnMut(&T) -> R,
    {
        self.items.iter().map(f).collect()
    }
}

impl<T: ListRecord> PagedCollection<T> {
    /// Decode a list payload
    ///
    /// `body` is either a bare array or an object holding the array under
    /// [`ListRecord::LIST_KEY`]. Elements that are not JSON objects, or that fail
    /// to map onto `T`, are skipped.
    pub fn from_body(body: &Value, pagination: Option<PaginationEnvelope>) -> Self {
        let list = match body.get(T::LIST_KEY) {
            Some(list) => list,
            None => body,
        };

        let items = match list.as_array() {
            Some(elements) => elements
                .iter()
                .enumerate()
                .filter_map(|(index, element)| decode_element::<T>(index, element))
                .collect(),
            None => {
                tracing::debug!("No '{}' list in response body", T::LIST_KEY);
                Vec::new()
            }
        };

        Self { items, pagination }
    }

    /// Decode the body of a dispatched request, keeping its pagination
    pub fn from_response(response: ApiResponse) -> Self {
        Self::from_body(&response.body, response.pagination)
    }

    /// `{"<list key>": [...], "pagination": {...}}`
    pub fn to_json(&self) -> Value {
        let mut object = serde_json::Map::new();
        object.insert(
            T::LIST_KEY.to_string(),
            Value::Array(self.items.iter().map(|record| record.to_json()).collect()),
        );
        object.insert(
            "pagination".to_string(),
            serde_json::to_value(self.pagination_info()).unwrap_or_else(|_| json!({})),
        );
        Value::Object(object)
    }
}

fn decode_element<T: ListRecord>(index: usize, element: &Value) -> Option<T> {
    if !element.is_object() {
        tracing::debug!("Skipping non-object element {} in '{}' list", index, T::LIST_KEY);
        return None;
    }

    match T::from_json(element.clone()) {
        Ok(record) => Some(record),
        Err(e) => {
            tracing::warn!(
                "Skipping malformed element {} in '{}' list: {}",
                index,
                T::LIST_KEY,
                e
            );
            None
        }
    }
}

impl<T> Default for PagedCollection<T> {
    fn default() -> Self {
        Self::new(Vec::new(), None)
    }
}

impl<T> Index<usize> for PagedCollection<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T> AsRef<[T]> for PagedCollection<T> {
    fn as_ref(&self) -> &[T] {
        &self.items
    }
}

impl<'a, T> IntoIterator for &'a PagedCollection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> IntoIterator for PagedCollection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(token: &str) -> Option<PaginationEnvelope> {
        Some(PaginationEnvelope {
            page_count: Some(3),
            page_size: Some(2),
            next_page_token: Some(token.to_string()),
            ..Default::default()
        })
    }

    #[test]
    fn test_accessors() {
        let collection = PagedCollection::new(vec![10, 20, 30], envelope("next"));

        assert_eq!(collection.count(), 3);
        assert_eq!(collection.first(), Some(&10));
        assert_eq!(collection.last(), Some(&30));
        assert_eq!(collection[1], 20);
        assert_eq!(collection.get(3), None);
        assert_eq!(collection.page_count(), Some(3));
        assert_eq!(collection.page_number(), None);
        assert!(collection.has_more_pages());
    }

    #[test]
    fn test_empty_collection() {
        let collection: PagedCollection<i32> = PagedCollection::default();

        assert!(collection.is_empty());
        assert!(!collection.is_not_empty());
        assert_eq!(collection.first(), None);
        assert_eq!(collection.last(), None);
        assert!(!collection.has_more_pages());
        assert_eq!(collection.pagination_info(), PaginationEnvelope::default());
    }

    #[test]
    fn test_filter_keeps_pagination() {
        let collection = PagedCollection::new(vec![1, 2, 3], envelope("abc"));
        let even = collection.filter(|n| n % 2 == 0);

        assert_eq!(even.all(), &[2]);
        assert_eq!(even.next_page_token(), Some("abc"));
        assert_eq!(even.page_count(), Some(3));
        // Source untouched
        assert_eq!(collection.count(), 3);
    }

    #[test]
    fn test_map_detaches_from_pagination() {
        let collection = PagedCollection::new(vec![1, 2, 3], envelope("abc"));
        let doubled: Vec<i32> = collection.map(|n| n * 2);
        assert_eq!(doubled, vec![2, 4, 6]);
    }

    #[test]
    fn test_iteration_is_restartable() {
        let collection = PagedCollection::new(vec!["a", "b"], None);

        let first_pass: Vec<_> = collection.iter().collect();
        let second_pass: Vec<_> = (&collection).into_iter().collect();
        assert_eq!(first_pass, second_pass);

        let mut seen = Vec::new();
        for item in &collection {
            seen.push(*item);
        }
        assert_eq!(seen, vec!["a", "b"]);
    }

    #[test]
    fn test_to_json_includes_list_and_pagination() {
        use crate::zoom_api::records::Registrant;

        let body = json!({
            "page_size": 2,
            "total_records": 3,
            "next_page_token": "more",
            "registrants": [
                {"id": "r1", "email": "a@example.com", "status": "approved"},
                {"id": "r2", "email": "b@example.com"}
            ]
        });

        let collection =
            PagedCollection::<Registrant>::from_body(&body, PaginationEnvelope::from_body(&body));
        let json = collection.to_json();

        assert_eq!(
            json["registrants"],
            json!([
                {"id": "r1", "email": "a@example.com", "status": "approved"},
                {"id": "r2", "email": "b@example.com"}
            ])
        );
        assert_eq!(
            json["pagination"],
            json!({"page_size": 2, "total_records": 3, "next_page_token": "more"})
        );
        assert_eq!(json.as_object().unwrap().len(), 2);

        let unpaged = PagedCollection::<Registrant>::from_body(&body, None).to_json();
        assert_eq!(unpaged["pagination"], json!({}));
    }
}
