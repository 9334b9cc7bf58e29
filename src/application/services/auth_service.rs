//! Auth Service - Registration, login and per-user preferences

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

use crate::application::dto::{
    AuthResponseDto, LoginRequestDto, RegisterRequestDto, UpdatePreferencesRequestDto,
    UserResponseDto,
};
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::outbound::{
    ClockPort, PasswordHasherPort, TokenPort, UserRepositoryPort,
};
use crate::application::validation::{
    validate_login, validate_preferences_patch, validate_registration,
};
use crate::domain::entities::User;
use crate::domain::value_objects::UserId;

#[async_trait]
pub trait AuthService: Send + Sync {
    async fn register(&self, request: RegisterRequestDto) -> ServiceResult<AuthResponseDto>;

    async fn login(&self, request: LoginRequestDto) -> ServiceResult<AuthResponseDto>;

    async fn current_user(&self, id: UserId) -> ServiceResult<UserResponseDto>;

    async fn update_preferences(
        &self,
        id: UserId,
        request: UpdatePreferencesRequestDto,
    ) -> ServiceResult<UserResponseDto>;

    /// Resolve a bearer token to the user it was issued to
    fn authenticate(&self, token: &str) -> ServiceResult<UserId>;
}

pub struct AuthServiceImpl {
    users: Arc<dyn UserRepositoryPort>,
    hasher: Arc<dyn PasswordHasherPort>,
    tokens: Arc<dyn TokenPort>,
    clock: Arc<dyn ClockPort>,
}

impl AuthServiceImpl {
    pub fn new(
        users: Arc<dyn UserRepositoryPort>,
        hasher: Arc<dyn PasswordHasherPort>,
        tokens: Arc<dyn TokenPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
            clock,
        }
    }

    fn respond(&self, user: User) -> ServiceResult<AuthResponseDto> {
        let issued = self.tokens.issue(user.id)?;
        Ok(AuthResponseDto {
            token: issued.token,
            user: user.into(),
        })
    }

    async fn existing_user(&self, id: UserId) -> ServiceResult<User> {
        self.users
            .get(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User"))
    }
}

#[async_trait]
impl AuthService for AuthServiceImpl {
    #[instrument(skip(self, request))]
    async fn register(&self, request: RegisterRequestDto) -> ServiceResult<AuthResponseDto> {
        let input = validate_registration(&request)?;

        let hasher = Arc::clone(&self.hasher);
        let password = input.password;
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .context("Password hashing task failed")??;

        let user = User::new(input.email, password_hash, input.name, self.clock.now());
        if !self.users.create(&user).await? {
            return Err(ServiceError::conflict("Email is already registered"));
        }

        info!(user_id = %user.id, "Registered user");
        self.respond(user)
    }

    #[instrument(skip(self, request))]
    async fn login(&self, request: LoginRequestDto) -> ServiceResult<AuthResponseDto> {
        let input = validate_login(&request)?;

        let Some(user) = self.users.find_by_email(&input.email).await? else {
            debug!("Login for unknown email");
            return Err(ServiceError::Unauthenticated);
        };

        let hasher = Arc::clone(&self.hasher);
        let password = input.password;
        let stored = user.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || hasher.verify(&password, &stored))
            .await
            .context("Password verification task failed")??;
        if !matches {
            warn!(user_id = %user.id, "Rejected login with wrong password");
            return Err(ServiceError::Unauthenticated);
        }

        info!(user_id = %user.id, "User logged in");
        self.respond(user)
    }

    #[instrument(skip(self))]
    async fn current_user(&self, id: UserId) -> ServiceResult<UserResponseDto> {
        Ok(self.existing_user(id).await?.into())
    }

    #[instrument(skip(self, request))]
    async fn update_preferences(
        &self,
        id: UserId,
        request: UpdatePreferencesRequestDto,
    ) -> ServiceResult<UserResponseDto> {
        let patch = validate_preferences_patch(&request)?;
        let mut user = self.existing_user(id).await?;

        let mut preferences = user.preferences.clone();
        patch.apply(&mut preferences);
        user.update_preferences(preferences, self.clock.now());
        self.users.update(&user).await?;

        info!(user_id = %id, "Updated preferences");
        Ok(user.into())
    }

    fn authenticate(&self, token: &str) -> ServiceResult<UserId> {
        self.tokens.verify(token).ok_or(ServiceError::Unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::outbound::{
        IssuedToken, MockClockPort, MockPasswordHasherPort, MockTokenPort, MockUserRepositoryPort,
    };
    use crate::domain::value_objects::Theme;
    use crate::application::dto::VrControlsDto;
    use chrono::Utc;

    fn clock() -> Arc<dyn ClockPort> {
        let mut clock = MockClockPort::new();
        clock.expect_now().returning(Utc::now);
        Arc::new(clock)
    }

    fn hasher() -> MockPasswordHasherPort {
        let mut hasher = MockPasswordHasherPort::new();
        hasher
            .expect_hash()
            .returning(|p| Ok(format!("hashed:{p}")));
        hasher
            .expect_verify()
            .returning(|p, h| Ok(h == format!("hashed:{p}")));
        hasher
    }

    fn tokens() -> MockTokenPort {
        let mut tokens = MockTokenPort::new();
        tokens.expect_issue().returning(|user| {
            Ok(IssuedToken {
                token: format!("token-for-{user}"),
                expires_at: Utc::now(),
            })
        });
        tokens
    }

    fn service(users: MockUserRepositoryPort) -> AuthServiceImpl {
        AuthServiceImpl::new(Arc::new(users), Arc::new(hasher()), Arc::new(tokens()), clock())
    }

    fn stored_user() -> User {
        User::new("ada@example.com", "hashed:correct horse", "Ada", Utc::now())
    }

    #[tokio::test]
    async fn register_hashes_password_and_issues_token() {
        let mut users = MockUserRepositoryPort::new();
        users
            .expect_create()
            .withf(|u| u.email == "ada@example.com" && u.password_hash == "hashed:correct horse")
            .times(1)
            .returning(|_| Ok(true));

        let response = service(users)
            .register(RegisterRequestDto {
                email: Some("Ada@Example.com".to_string()),
                password: Some("correct horse".to_string()),
                name: Some("Ada".to_string()),
            })
            .await
            .expect("registered");

        assert_eq!(response.user.email, "ada@example.com");
        assert_eq!(response.token, format!("token-for-{}", response.user.id));
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let mut users = MockUserRepositoryPort::new();
        users.expect_create().returning(|_| Ok(false));

        let result = service(users)
            .register(RegisterRequestDto {
                email: Some("ada@example.com".to_string()),
                password: Some("correct horse".to_string()),
                name: Some("Ada".to_string()),
            })
            .await;
        assert!(matches!(result, Err(ServiceError::Conflict(_))));
    }

    #[tokio::test]
    async fn short_password_never_reaches_storage() {
        let mut users = MockUserRepositoryPort::new();
        users.expect_create().never();

        let result = service(users)
            .register(RegisterRequestDto {
                email: Some("ada@example.com".to_string()),
                password: Some("short".to_string()),
                name: Some("Ada".to_string()),
            })
            .await;
        assert!(matches!(result, Err(ServiceError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn login_checks_the_password() {
        let mut users = MockUserRepositoryPort::new();
        users
            .expect_find_by_email()
            .returning(|_| Ok(Some(stored_user())));
        let service = service(users);

        let ok = service
            .login(LoginRequestDto {
                email: Some("ada@example.com".to_string()),
                password: Some("correct horse".to_string()),
            })
            .await;
        assert!(ok.is_ok());

        let wrong = service
            .login(LoginRequestDto {
                email: Some("ada@example.com".to_string()),
                password: Some("battery staple".to_string()),
            })
            .await;
        assert!(matches!(wrong, Err(ServiceError::Unauthenticated)));
    }

    #[tokio::test]
    async fn unknown_email_is_unauthenticated() {
        let mut users = MockUserRepositoryPort::new();
        users.expect_find_by_email().returning(|_| Ok(None));

        let result = service(users)
            .login(LoginRequestDto {
                email: Some("nobody@example.com".to_string()),
                password: Some("whatever1".to_string()),
            })
            .await;
        assert!(matches!(result, Err(ServiceError::Unauthenticated)));
    }

    #[tokio::test]
    async fn preferences_patch_keeps_untouched_fields() {
        let user = stored_user();
        let id = user.id;
        let mut users = MockUserRepositoryPort::new();
        users
            .expect_get()
            .returning(move |_| Ok(Some(user.clone())));
        users.expect_update().times(1).returning(|_| Ok(()));

        let updated = service(users)
            .update_preferences(
                id,
                UpdatePreferencesRequestDto {
                    theme: Some("dark".to_string()),
                    vr_controls: Some(VrControlsDto {
                        grid_size: Some(0.25),
                        ..Default::default()
                    }),
                    ..Default::default()
                },
            )
            .await
            .expect("updated");

        assert_eq!(updated.preferences.theme, Theme::Dark);
        assert!(updated.preferences.notifications);
        assert_eq!(updated.preferences.vr_controls.grid_size, 0.25);
        assert_eq!(updated.preferences.vr_controls.movement_speed, 1.0);
    }

    #[test]
    fn bad_token_is_unauthenticated() {
        let mut tokens = MockTokenPort::new();
        tokens.expect_verify().returning(|_| None);
        let service = AuthServiceImpl::new(
            Arc::new(MockUserRepositoryPort::new()),
            Arc::new(MockPasswordHasherPort::new()),
            Arc::new(tokens),
            clock(),
        );
        assert!(matches!(
            service.authenticate("garbage"),
            Err(ServiceError::Unauthenticated)
        ));
    }
}
