//! Mock sign-in on top of a `SessionStore`.
//!
//! Any non-empty email and password is accepted. There is no credential
//! check and no server; this only decides what user object gets stored.

use crate::core::rng::Rng;
use crate::core::session::{GameSession, GameSessionResult};
use crate::error::{AccountError, StoreError};
use crate::store::{Language, Role, SessionStore, User};

/// Grade assigned to students who do not give one.
pub const DEFAULT_STUDENT_GRADE: u8 = 8;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LEN: usize = 9;

pub struct Accounts<S: SessionStore> {
    store: S,
    rng: Rng,
}

impl<S: SessionStore> Accounts<S> {
    pub fn new(store: S, seed: u64) -> Self {
        Self {
            store,
            rng: Rng::new(seed),
        }
    }

    pub fn current(&self) -> Option<&User> {
        self.store.user()
    }

    fn next_id(&mut self) -> String {
        (0..ID_LEN)
            .map(|_| ID_ALPHABET[self.rng.pick(ID_ALPHABET.len())] as char)
            .collect()
    }

    /// Sign in. The display name is the part of the email before `@`.
    pub fn login(&mut self, email: &str, password: &str, role: Role) -> Result<&User, AccountError> {
        if email.is_empty() || password.is_empty() {
            return Err(AccountError::MissingCredentials);
        }
        let name = email.split('@').next().unwrap_or(email);
        let mut user = User::new(self.next_id(), name, email, role);
        if user.is_student() {
            user.grade = Some(DEFAULT_STUDENT_GRADE);
        }
        self.sign_in(user)
    }

    pub fn register(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
        grade: Option<u8>,
    ) -> Result<&User, AccountError> {
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(AccountError::MissingCredentials);
        }
        let mut user = User::new(self.next_id(), name, email, role);
        user.grade = match role {
            Role::Student => Some(grade.unwrap_or(DEFAULT_STUDENT_GRADE)),
            Role::Teacher => grade,
        };
        self.sign_in(user)
    }

    fn sign_in(&mut self, user: User) -> Result<&User, AccountError> {
        log::info!("signed in {} as {:?}", user.email, user.role);
        self.store.set_user(user)?;
        self.store.user().ok_or(AccountError::Store(StoreError::NoUser))
    }

    pub fn logout(&mut self) -> Result<(), StoreError> {
        if let Some(user) = self.store.user() {
            log::info!("signed out {}", user.email);
        }
        self.store.clear_user()
    }

    /// Change the preferred language. Does nothing when nobody is signed in.
    pub fn update_language(&mut self, language: Language) -> Result<(), StoreError> {
        let Some(mut user) = self.store.user().cloned() else {
            return Ok(());
        };
        user.preferred_language = language;
        self.store.set_user(user)
    }

    /// Record a finished session against the current user.
    pub fn record(&mut self, session: &mut GameSession) -> Result<Option<GameSessionResult>, StoreError> {
        session.report(&mut self.store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    fn accounts() -> Accounts<MemoryStore> {
        Accounts::new(MemoryStore::new(), 7)
    }

    #[test]
    fn login_requires_email_and_password() {
        let mut acc = accounts();
        assert!(matches!(acc.login("", "pw", Role::Student), Err(AccountError::MissingCredentials)));
        assert!(matches!(acc.login("a@b.in", "", Role::Student), Err(AccountError::MissingCredentials)));
        assert!(acc.current().is_none());
    }

    #[test]
    fn login_builds_student_from_email() {
        let mut acc = accounts();
        let user = acc.login("priya.sharma@school.in", "anything", Role::Student).unwrap();
        assert_eq!(user.name, "priya.sharma");
        assert_eq!(user.grade, Some(DEFAULT_STUDENT_GRADE));
        assert_eq!(user.id.len(), ID_LEN);
        assert_eq!(user.badges, Some(vec![]));
    }

    #[test]
    fn teacher_login_has_no_grade() {
        let mut acc = accounts();
        let user = acc.login("anita@school.in", "pw", Role::Teacher).unwrap();
        assert_eq!(user.grade, None);
        assert_eq!(user.badges, None);
    }

    #[test]
    fn register_keeps_given_grade() {
        let mut acc = accounts();
        let user = acc.register("Meera Patel", "meera@school.in", "pw", Role::Student, Some(12)).unwrap();
        assert_eq!(user.name, "Meera Patel");
        assert_eq!(user.grade, Some(12));
        assert!(acc.register("", "x@y.in", "pw", Role::Student, None).is_err());
    }

    #[test]
    fn language_and_logout() {
        let mut acc = accounts();
        acc.update_language(Language::Tamil).unwrap();
        acc.login("rahul@school.in", "pw", Role::Student).unwrap();
        acc.update_language(Language::Tamil).unwrap();
        assert_eq!(acc.current().unwrap().preferred_language, Language::Tamil);
        acc.logout().unwrap();
        assert!(acc.current().is_none());
    }

    #[test]
    fn ids_differ_between_logins() {
        let mut acc = accounts();
        let first = acc.login("a@b.in", "pw", Role::Student).unwrap().id.clone();
        let second = acc.login("a@b.in", "pw", Role::Student).unwrap().id.clone();
        assert_ne!(first, second);
    }
}
