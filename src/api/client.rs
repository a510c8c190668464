use reqwest::{
    header::{
        AUTHORIZATION,
        CONTENT_TYPE,
    },
    Client,
    Method,
    Response,
};
use serde::{
    de::DeserializeOwned,
    Serialize,
};

use super::{
    types::{
        BookDto,
        DataEnvelope,
        ErrorDto,
        KnownWordDto,
        LoginDto,
        LoginRequest,
        PageContentDto,
        SignupRequest,
        TranslateRequest,
        TranslationDto,
        UpdateTranslateRequest,
    },
    BookService,
    WordService,
};
use crate::{
    core::{
        http::{
            ensure_success,
            http_client,
            user_agent,
        },
        Book,
        KnownWord,
        LanguagePair,
        PageContent,
        ReaderError,
    },
    persistence::CredentialStore,
    settings::Settings,
};

/// REST client for the reading backend. The stored credential is attached
/// verbatim as the `Authorization` header of every call except login/signup.
pub struct ApiClient {
    http: Client,
    base_url: String,
    credentials: CredentialStore,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(settings: &Settings, credentials: CredentialStore) -> Result<Self, ReaderError> {
        let token = credentials.load();
        Ok(Self {
            http: http_client(settings.request_timeout_secs)?,
            base_url: settings.api_url.clone(),
            credentials,
            token,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), ReaderError> {
        let resp = self
            .http
            .post(self.url("/api/auth/login"))
            .header(user_agent().0, user_agent().1)
            .json(&LoginRequest { email, password })
            .send()
            .await?;

        // The login endpoint reports bad credentials in the body, not always in the status.
        let status = resp.status().as_u16();
        let dto: LoginDto = resp.json().await?;
        match (dto.token, dto.error) {
            (Some(token), _) => {
                self.credentials.save(&token)?;
                self.token = Some(token);
                log::info!("Logged in as {email}");
                Ok(())
            }
            (None, error) => Err(ReaderError::Api {
                status,
                message: error.unwrap_or_else(|| "Login failed".to_string()),
            }),
        }
    }

    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        username: &str,
    ) -> Result<(), ReaderError> {
        let resp = self
            .http
            .post(self.url("/api/auth/signup"))
            .header(user_agent().0, user_agent().1)
            .json(&SignupRequest { email, password, username })
            .send()
            .await?;
        ensure_success(resp).await?;
        log::info!("Signed up {email}");
        Ok(())
    }

    pub fn logout(&mut self) -> Result<(), ReaderError> {
        self.token = None;
        self.credentials.clear()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn request<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Response, ReaderError> {
        let token = self.token.as_deref().ok_or(ReaderError::MissingCredential)?;

        let mut builder = self
            .http
            .request(method.clone(), self.url(path))
            .header(AUTHORIZATION, token)
            .header(user_agent().0, user_agent().1);
        if let Some(body) = body {
            builder = builder.header(CONTENT_TYPE, "application/json").json(body);
        }

        log::debug!("{} {}", method, path);
        ensure_success(builder.send().await?).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ReaderError> {
        let resp = self.request::<()>(Method::GET, path, None).await?;
        Ok(resp.json().await?)
    }

    /// For endpoints whose success body is irrelevant, but which may still
    /// carry an `{ error }` field.
    async fn send_expect_ok<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<(), ReaderError> {
        let resp = self.request(method, path, body).await?;
        let status = resp.status().as_u16();
        let text = resp.text().await?;
        if let Ok(ErrorDto { error: Some(message) }) = serde_json::from_str::<ErrorDto>(&text) {
            return Err(ReaderError::Api { status, message });
        }
        Ok(())
    }
}

impl BookService for ApiClient {
    async fn fetch_page(&self, book_id: &str, page: u32) -> Result<PageContent, ReaderError> {
        let dto: PageContentDto = self.get_json(&format!("/api/books/{book_id}/{page}")).await?;
        Ok(dto.into())
    }

    async fn list_books(&self) -> Result<Vec<Book>, ReaderError> {
        let envelope: DataEnvelope<Vec<BookDto>> = self.get_json("/api/books/").await?;
        Ok(envelope.data.into_iter().map(Book::from).collect())
    }

    async fn book_details(&self, book_id: &str) -> Result<Book, ReaderError> {
        let envelope: DataEnvelope<BookDto> =
            self.get_json(&format!("/api/books/{book_id}")).await?;
        Ok(envelope.data.into())
    }
}

impl WordService for ApiClient {
    async fn add_known_word(&self, word: &KnownWord) -> Result<(), ReaderError> {
        self.send_expect_ok(Method::POST, "/api/words", Some(&KnownWordDto::from(word))).await
    }

    async fn translate_word(
        &self,
        word: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, ReaderError> {
        let body = TranslateRequest {
            word,
            original_language: source_lang,
            translated_language: target_lang,
        };
        let resp = self.request(Method::POST, "/api/words/translation", Some(&body)).await?;
        let dto: TranslationDto = resp.json().await?;
        Ok(dto.word)
    }

    async fn list_known_words(
        &self,
        languages: &LanguagePair,
    ) -> Result<Vec<KnownWord>, ReaderError> {
        let envelope: DataEnvelope<Vec<KnownWordDto>> = self
            .get_json(&format!("/api/words/{}/{}", languages.original, languages.translated))
            .await?;
        Ok(envelope.data.into_iter().map(|w| w.into_model(languages)).collect())
    }

    async fn delete_known_word(&self, id: &str) -> Result<(), ReaderError> {
        self.send_expect_ok::<()>(Method::DELETE, &format!("/api/words/{id}"), None).await
    }

    async fn update_known_word(&self, id: &str, translate: bool) -> Result<(), ReaderError> {
        self.send_expect_ok(
            Method::PATCH,
            &format!("/api/words/{id}"),
            Some(&UpdateTranslateRequest { translate }),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_requests_without_credential_fail_fast() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::default();
        let client = ApiClient::new(&settings, settings.credential_store(dir.path())).unwrap();
        assert!(!client.is_authenticated());

        let result = client.fetch_page("book", 1).await;
        assert!(matches!(result, Err(ReaderError::MissingCredential)));
    }

    #[test]
    fn test_stored_credential_is_picked_up() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::default();
        let store = settings.credential_store(dir.path());
        store.save("abc").unwrap();

        let mut client = ApiClient::new(&settings, store).unwrap();
        assert!(client.is_authenticated());
        assert_eq!(client.url("/api/books/"), "http://localhost:3000/api/books/");

        client.logout().unwrap();
        assert!(!client.is_authenticated());
    }
}
