//! Lazily paged listings.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use crate::contentful::Contentful;
use crate::error::ApiError;
use crate::http::{HttpRequest, Transport};
use crate::types::Page;

struct Cursor<'a, T> {
    api: &'a Contentful<T>,
    template: HttpRequest,
    skip: u64,
    limit: u64,
    done: bool,
}

/// A listing that fetches one page per [`Collection::next_page`] call.
///
/// Nothing is sent until the collection is advanced. An inert collection
/// (one whose request could not be built) yields empty pages forever.
pub struct Collection<'a, T, I> {
    cursor: Option<Cursor<'a, T>>,
    _items: PhantomData<fn() -> I>,
}

impl<'a, T: Transport, I: DeserializeOwned> Collection<'a, T, I> {
    pub(crate) fn new(api: &'a Contentful<T>, template: HttpRequest) -> Self {
        Self {
            cursor: Some(Cursor {
                api,
                template,
                skip: 0,
                limit: api.client().config().page_limit,
                done: false,
            }),
            _items: PhantomData,
        }
    }

    pub(crate) fn inert() -> Self {
        Self {
            cursor: None,
            _items: PhantomData,
        }
    }

    pub fn is_inert(&self) -> bool {
        self.cursor.is_none()
    }

    /// Whether another call to `next_page` may return items.
    pub fn has_more(&self) -> bool {
        self.cursor.as_ref().is_some_and(|c| !c.done)
    }

    /// Fetch the next page and advance past it.
    pub fn next_page(&mut self) -> Result<Page<I>, ApiError> {
        let Some(cursor) = self.cursor.as_mut() else {
            return Ok(Page::empty());
        };
        if cursor.done {
            return Ok(Page::empty());
        }

        let api = cursor.api;
        let request = api.client().paged(&cursor.template, cursor.skip, cursor.limit);
        let page: Page<I> = api.client().parse_page(api.execute(request)?)?;

        cursor.skip += page.items.len() as u64;
        cursor.done = page.items.is_empty() || cursor.skip >= page.total;
        Ok(page)
    }

    /// Drain every remaining page.
    pub fn collect_all(mut self) -> Result<Vec<I>, ApiError> {
        let mut items = Vec::new();
        while self.has_more() {
            items.extend(self.next_page()?.items);
        }
        Ok(items)
    }
}
