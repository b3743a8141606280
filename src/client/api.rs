//! Remote book API

use async_trait::async_trait;
use reqwest::Response;

use super::errors::{ClientError, ClientResult};
use crate::book::{Book, BookId, BookPatch, NewBook};
use crate::rest_api::ErrorResponse;

/// The four remote operations the client issues
#[async_trait]
pub trait BooksApi: Send + Sync {
    async fn list_books(&self) -> ClientResult<Vec<Book>>;

    async fn create_book(&self, book: &NewBook) -> ClientResult<Book>;

    /// `None` when the server no longer has the record
    async fn update_book(&self, id: &BookId, patch: &BookPatch) -> ClientResult<Option<Book>>;

    async fn delete_book(&self, id: &BookId) -> ClientResult<()>;
}

/// [`BooksApi`] over HTTP/JSON
#[derive(Debug, Clone)]
pub struct HttpBooksApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpBooksApi {
    /// `base_url` is the collection URL, e.g. `http://localhost:3000/api/books`
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn book_url(&self, id: &BookId) -> String {
        format!("{}/{}", self.base_url, id)
    }

    /// Turn a non-2xx response into [`ClientError::Status`], keeping the
    /// server's message when the body carries one.
    async fn check(response: Response) -> ClientResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.json::<ErrorResponse>().await {
            Ok(body) => body.error,
            Err(_) => status.canonical_reason().unwrap_or("Unknown status").to_string(),
        };

        Err(ClientError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl BooksApi for HttpBooksApi {
    async fn list_books(&self) -> ClientResult<Vec<Book>> {
        let response = self.http.get(&self.base_url).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn create_book(&self, book: &NewBook) -> ClientResult<Book> {
        let response = self.http.post(&self.base_url).json(book).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn update_book(&self, id: &BookId, patch: &BookPatch) -> ClientResult<Option<Book>> {
        let response = self.http.put(self.book_url(id)).json(patch).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn delete_book(&self, id: &BookId) -> ClientResult<()> {
        let response = self.http.delete(self.book_url(id)).send().await?;
        Self::check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let api = HttpBooksApi::new("http://localhost:3000/api/books/");
        assert_eq!(api.base_url(), "http://localhost:3000/api/books");

        let id: BookId = "2f1c7a52-8d63-4a8e-9a4f-0f3f7d3c9b10".parse().unwrap();
        assert_eq!(
            api.book_url(&id),
            "http://localhost:3000/api/books/2f1c7a52-8d63-4a8e-9a4f-0f3f7d3c9b10"
        );
    }
}
