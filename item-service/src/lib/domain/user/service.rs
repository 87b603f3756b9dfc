use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;

use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::AuthFailure;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
/// Password hashing and verification run on the blocking thread pool.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Shared authentication core
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

/// Run CPU-bound work off the async executor threads.
async fn run_blocking<T, F>(task: F) -> Result<T, UserError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| UserError::Unknown(format!("Blocking task failed: {}", e)))
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        if self
            .repository
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(UserError::EmailAlreadyExists(command.email.to_string()));
        }

        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password.into_inner();
        let credential = run_blocking(move || authenticator.hash_password(&password)).await??;

        let user = self.repository.create(&command.email, &credential).await?;
        tracing::info!(user_id = %user.id, "User registered");

        Ok(user)
    }

    async fn login(&self, command: LoginCommand) -> Result<String, UserError> {
        let user = match self.repository.find_by_email(&command.email).await? {
            Some(user) => user,
            None => {
                let authenticator = Arc::clone(&self.authenticator);
                let password = command.password;
                run_blocking(move || authenticator.verify_decoy(&password)).await?;

                tracing::debug!("Login attempt for unknown email");
                return Err(UserError::InvalidCredentials);
            }
        };

        let authenticator = Arc::clone(&self.authenticator);
        let credential = user.credential.clone();
        let password = command.password;
        let user_id = user.id;
        let outcome =
            run_blocking(move || authenticator.authenticate(&password, &credential, user_id))
                .await?;

        match outcome {
            Ok(_) if !user.is_active => {
                tracing::debug!(user_id = %user.id, "Login attempt for inactive user");
                Err(UserError::InvalidCredentials)
            }
            Ok(result) => {
                tracing::info!(user_id = %user.id, "User logged in");
                Ok(result.access_token)
            }
            Err(AuthenticationError::WrongPassword) => {
                tracing::debug!(user_id = %user.id, "Login attempt with wrong password");
                Err(UserError::InvalidCredentials)
            }
            Err(AuthenticationError::Password(e)) => {
                tracing::error!(user_id = %user.id, error = %e, "Stored credential is corrupt");
                Err(UserError::Password(e))
            }
            Err(AuthenticationError::Token(e)) => Err(UserError::Token(e)),
        }
    }

    async fn authenticate(&self, token: Option<&str>) -> Result<User, AuthFailure> {
        let token = token.ok_or(AuthFailure::MissingToken)?;

        let user_id = self.authenticator.validate_subject::<UserId>(token)?;

        let user = self
            .repository
            .find_by_id(&user_id)
            .await
            .map_err(|e| AuthFailure::Repository(e.to_string()))?
            .ok_or_else(|| AuthFailure::UnknownPrincipal(user_id.to_string()))?;

        if !user.is_active {
            return Err(AuthFailure::InactivePrincipal(user_id.to_string()));
        }
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use auth::Credential;
    use auth::HashSettings;
    use auth::JwtError;
    use auth::PasswordError;
    use auth::TokenSettings;
    use chrono::Utc;
    use mockall::mock;

    use super::*;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::Password;

    // Define mocks in the test module using mockall
    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, email: &EmailAddress, credential: &Credential) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
        }
    }

    fn authenticator() -> Arc<Authenticator> {
        Arc::new(Authenticator::new(
            TokenSettings::new("test-secret-key-for-jwt-signing-at-least-32-bytes", "HS256", 30)
                .unwrap(),
            HashSettings::new("bcrypt", 4).unwrap(),
        ))
    }

    fn stored_user(id: i64, email: &str, credential: Credential) -> User {
        User {
            id: UserId(id),
            email: EmailAddress::new(email.to_string()).unwrap(),
            credential,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    fn register_command(email: &str, password: &str) -> RegisterUserCommand {
        RegisterUserCommand::new(
            EmailAddress::new(email.to_string()).unwrap(),
            Password::new(password.to_string()).unwrap(),
        )
    }

    fn login_command(email: &str, password: &str) -> LoginCommand {
        LoginCommand {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .withf(|email| email == "a@x.com")
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_create()
            .withf(|email, credential| {
                email.as_str() == "a@x.com"
                    && credential.as_str().starts_with("$2b$")
                    && credential.as_str() != "password123"
            })
            .times(1)
            .returning(|email, credential| {
                Ok(stored_user(1, email.as_str(), credential.clone()))
            });

        let service = UserService::new(Arc::new(repository), authenticator());

        let user = service
            .register(register_command("a@x.com", "password123"))
            .await
            .expect("Registration failed");

        assert_eq!(user.id, UserId(1));
        assert_eq!(user.email.as_str(), "a@x.com");
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut repository = MockTestUserRepository::new();
        let existing = stored_user(1, "a@x.com", Credential::from_stored("$2b$04$x"));

        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repository.expect_create().times(0);

        let service = UserService::new(Arc::new(repository), authenticator());

        let result = service
            .register(register_command("a@x.com", "password123"))
            .await;
        assert!(matches!(result, Err(UserError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_register_duplicate_detected_by_repository() {
        let mut repository = MockTestUserRepository::new();

        repository.expect_find_by_email().returning(|_| Ok(None));
        repository
            .expect_create()
            .times(1)
            .returning(|email, _| Err(UserError::EmailAlreadyExists(email.to_string())));

        let service = UserService::new(Arc::new(repository), authenticator());

        let result = service
            .register(register_command("a@x.com", "password123"))
            .await;
        assert!(matches!(result, Err(UserError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_login_success_token_resolves_to_user() {
        let authenticator = authenticator();
        let credential = authenticator.hash_password("password123").unwrap();
        let user = stored_user(7, "a@x.com", credential);

        let mut repository = MockTestUserRepository::new();
        let by_email = user.clone();
        repository
            .expect_find_by_email()
            .returning(move |_| Ok(Some(by_email.clone())));
        let by_id = user.clone();
        repository
            .expect_find_by_id()
            .withf(|id| *id == UserId(7))
            .times(1)
            .returning(move |_| Ok(Some(by_id.clone())));

        let service = UserService::new(Arc::new(repository), Arc::clone(&authenticator));

        let token = service
            .login(login_command("a@x.com", "password123"))
            .await
            .expect("Login failed");
        assert_eq!(authenticator.validate_token(&token).unwrap(), "7");

        let resolved = service.authenticate(Some(token.as_str())).await.unwrap();
        assert_eq!(resolved.id, UserId(7));
        assert_eq!(resolved.email.as_str(), "a@x.com");
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let authenticator = authenticator();
        let credential = authenticator.hash_password("password123").unwrap();
        let user = stored_user(7, "a@x.com", credential);

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let service = UserService::new(Arc::new(repository), authenticator);

        let result = service.login(login_command("a@x.com", "wrongpassword")).await;
        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        repository.expect_find_by_id().times(0);
        repository.expect_create().times(0);

        let service = UserService::new(Arc::new(repository), authenticator());

        let result = service
            .login(login_command("nobody@x.com", "password123"))
            .await;
        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_email_runs_a_full_verification() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_find_by_email().returning(|_| Ok(None));

        // Cost 10 makes one bcrypt verification clearly measurable.
        let authenticator = Arc::new(Authenticator::new(
            TokenSettings::new("test-secret-key-for-jwt-signing-at-least-32-bytes", "HS256", 30)
                .unwrap(),
            HashSettings::new("bcrypt", 10).unwrap(),
        ));
        let service = UserService::new(Arc::new(repository), Arc::clone(&authenticator));

        // First call hashes the decoy; time the second.
        let _ = service.login(login_command("nobody@x.com", "password123")).await;

        let reference = authenticator.hash_password("password123").unwrap();
        let started = std::time::Instant::now();
        assert!(!authenticator.verify_password("wrongpassword", &reference).unwrap());
        let one_verification = started.elapsed();

        let started = std::time::Instant::now();
        let result = service
            .login(login_command("nobody@x.com", "password123"))
            .await;
        let unknown_email = started.elapsed();

        assert!(matches!(result, Err(UserError::InvalidCredentials)));
        assert!(
            unknown_email * 4 >= one_verification,
            "unknown email took {:?}, one verification takes {:?}",
            unknown_email,
            one_verification
        );
    }

    #[tokio::test]
    async fn test_login_inactive_user() {
        let authenticator = authenticator();
        let credential = authenticator.hash_password("password123").unwrap();
        let mut user = stored_user(7, "a@x.com", credential);
        user.is_active = false;

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let service = UserService::new(Arc::new(repository), authenticator);

        let result = service.login(login_command("a@x.com", "password123")).await;
        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_corrupt_credential() {
        let user = stored_user(7, "a@x.com", Credential::from_stored("not-a-hash"));

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let service = UserService::new(Arc::new(repository), authenticator());

        let result = service.login(login_command("a@x.com", "password123")).await;
        assert!(matches!(
            result,
            Err(UserError::Password(PasswordError::InvalidCredentialFormat(_)))
        ));
    }

    #[tokio::test]
    async fn test_authenticate_missing_token() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_find_by_id().times(0);

        let service = UserService::new(Arc::new(repository), authenticator());

        assert_eq!(
            service.authenticate(None).await.unwrap_err(),
            AuthFailure::MissingToken
        );
    }

    #[tokio::test]
    async fn test_authenticate_malformed_token() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_find_by_id().times(0);

        let service = UserService::new(Arc::new(repository), authenticator());

        assert!(matches!(
            service.authenticate(Some("not.a.token")).await,
            Err(AuthFailure::MalformedToken(_))
        ));
    }

    #[tokio::test]
    async fn test_authenticate_non_numeric_subject() {
        let authenticator = authenticator();
        let token = authenticator.issue_token("alice").unwrap();

        let mut repository = MockTestUserRepository::new();
        repository.expect_find_by_id().times(0);

        let service = UserService::new(Arc::new(repository), authenticator);

        assert_eq!(
            service.authenticate(Some(token.as_str())).await.unwrap_err(),
            AuthFailure::InvalidSubject("alice".to_string())
        );
    }

    #[tokio::test]
    async fn test_authenticate_unknown_principal() {
        let authenticator = authenticator();
        let token = authenticator.issue_token(UserId(404)).unwrap();

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_id()
            .withf(|id| *id == UserId(404))
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository), authenticator);

        assert_eq!(
            service.authenticate(Some(token.as_str())).await.unwrap_err(),
            AuthFailure::UnknownPrincipal("404".to_string())
        );
    }

    #[tokio::test]
    async fn test_authenticate_inactive_principal() {
        let authenticator = authenticator();
        let token = authenticator.issue_token(UserId(7)).unwrap();

        let mut user = stored_user(7, "a@x.com", Credential::from_stored("$2b$04$x"));
        user.is_active = false;

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = UserService::new(Arc::new(repository), authenticator);

        assert_eq!(
            service.authenticate(Some(token.as_str())).await.unwrap_err(),
            AuthFailure::InactivePrincipal("7".to_string())
        );
    }

    #[tokio::test]
    async fn test_authenticate_repository_failure() {
        let authenticator = authenticator();
        let token = authenticator.issue_token(UserId(1)).unwrap();

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_id()
            .returning(|_| Err(UserError::DatabaseError("connection reset".to_string())));

        let service = UserService::new(Arc::new(repository), authenticator);

        assert!(matches!(
            service.authenticate(Some(token.as_str())).await,
            Err(AuthFailure::Repository(_))
        ));
    }

    #[tokio::test]
    async fn test_authenticate_token_signed_elsewhere() {
        let foreign = Authenticator::new(
            TokenSettings::new("a-completely-different-secret-value!!", "HS256", 30).unwrap(),
            HashSettings::new("bcrypt", 4).unwrap(),
        );
        let token = foreign.issue_token(UserId(1)).unwrap();

        let mut repository = MockTestUserRepository::new();
        repository.expect_find_by_id().times(0);

        let service = UserService::new(Arc::new(repository), authenticator());

        let failure = service.authenticate(Some(token.as_str())).await.unwrap_err();
        assert!(matches!(failure, AuthFailure::MalformedToken(_)));
        assert_ne!(
            failure,
            AuthFailure::from(JwtError::Expired),
            "signature failures stay distinguishable from expiry"
        );
    }
}
