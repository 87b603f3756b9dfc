use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Algorithm;
use auth::Authenticator;
use auth::Credential;
use auth::HashSettings;
use auth::JwtHandler;
use auth::TokenSettings;
use chrono::Utc;
use item_service::domain::item::errors::ItemError;
use item_service::domain::item::models::Item;
use item_service::domain::item::models::ItemFields;
use item_service::domain::item::models::ItemId;
use item_service::domain::item::models::ItemSearch;
use item_service::domain::item::ports::ItemRepository;
use item_service::domain::item::service::ItemService;
use item_service::domain::user::models::EmailAddress;
use item_service::domain::user::models::User;
use item_service::domain::user::models::UserId;
use item_service::domain::user::ports::UserRepository;
use item_service::domain::user::service::UserService;
use item_service::inbound::http::router::create_router;
use item_service::user::errors::UserError;
use serde_json::json;
use serde_json::Value;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server backed by in-memory storage
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
    users: Arc<InMemoryUserRepository>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let token_settings =
            TokenSettings::new(JWT_SECRET, "HS256", 30).expect("Invalid token settings");
        let hash_settings = HashSettings::new("bcrypt", 4).expect("Invalid hash settings");
        let authenticator = Arc::new(Authenticator::new(token_settings, hash_settings));

        let users = Arc::new(InMemoryUserRepository::default());
        let user_service = Arc::new(UserService::new(Arc::clone(&users), authenticator));
        let item_service = Arc::new(ItemService::new(Arc::new(
            InMemoryItemRepository::default(),
        )));

        let router = create_router(user_service, item_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(JWT_SECRET, Algorithm::HS256),
            users,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register a user and return the response body
    pub async fn register(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/users/register")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log in with the password-grant form
    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/users/login")
            .form(&[("username", email), ("password", password)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Register and log in, returning the access token
    pub async fn register_and_login(&self, email: &str, password: &str) -> String {
        self.register(email, password).await;
        let body: Value = self
            .login(email, password)
            .await
            .json()
            .await
            .expect("Failed to parse response");

        body["data"]["access_token"]
            .as_str()
            .expect("Missing access token")
            .to_string()
    }

    /// Flip a stored user to inactive, as an administrator would
    pub fn deactivate(&self, email: &str) {
        let mut users = self.users.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|user| user.email.as_str() == email)
            .expect("Unknown user");
        user.is_active = false;
    }

    /// Create an item and return its id
    pub async fn create_item(&self, token: &str, name: &str, price: f64) -> i64 {
        let body: Value = self
            .post_authenticated("/items", token)
            .json(&json!({ "name": name, "price": price }))
            .send()
            .await
            .expect("Failed to execute request")
            .json()
            .await
            .expect("Failed to parse response");

        body["data"]["id"].as_i64().expect("Missing item id")
    }
}

#[derive(Default)]
struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(
        &self,
        email: &EmailAddress,
        credential: &Credential,
    ) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|user| user.email == *email) {
            return Err(UserError::EmailAlreadyExists(email.to_string()));
        }

        let user = User {
            id: UserId(users.len() as i64 + 1),
            email: email.clone(),
            credential: credential.clone(),
            is_active: true,
            created_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|user| user.id == *id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|user| user.email.as_str() == email).cloned())
    }
}

#[derive(Default)]
struct InMemoryItemRepository {
    items: Mutex<Vec<Item>>,
    next_id: Mutex<i64>,
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn create(&self, owner: UserId, fields: &ItemFields) -> Result<Item, ItemError> {
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;

        let item = Item {
            id: ItemId(*next_id),
            owner_id: owner,
            name: fields.name.clone(),
            description: fields.description.clone(),
            price: fields.price,
            in_stock: fields.in_stock,
        };
        self.items.lock().unwrap().push(item.clone());
        Ok(item)
    }

    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Item>, ItemError> {
        let items = self.items.lock().unwrap();
        Ok(items
            .iter()
            .filter(|item| item.owner_id == owner)
            .cloned()
            .collect())
    }

    async fn find_for_owner(&self, id: ItemId, owner: UserId) -> Result<Option<Item>, ItemError> {
        let items = self.items.lock().unwrap();
        Ok(items
            .iter()
            .find(|item| item.id == id && item.owner_id == owner)
            .cloned())
    }

    async fn update(&self, item: &Item) -> Result<Item, ItemError> {
        let mut items = self.items.lock().unwrap();
        let stored = items
            .iter_mut()
            .find(|stored| stored.id == item.id && stored.owner_id == item.owner_id)
            .ok_or_else(|| ItemError::NotFound(item.id.to_string()))?;

        *stored = item.clone();
        Ok(item.clone())
    }

    async fn delete(&self, id: ItemId, owner: UserId) -> Result<(), ItemError> {
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|item| !(item.id == id && item.owner_id == owner));

        if items.len() == before {
            return Err(ItemError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn search(&self, owner: UserId, search: &ItemSearch) -> Result<Vec<Item>, ItemError> {
        let items = self.items.lock().unwrap();
        Ok(items
            .iter()
            .filter(|item| item.owner_id == owner && search.matches(item))
            .cloned()
            .collect())
    }
}
