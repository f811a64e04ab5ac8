//! Session store: who is signed in and what they have earned.
//!
//! One user object, persisted by whatever the host offers. The engine only
//! talks to the `SessionStore` trait; `MemoryStore` and `JsonFileStore` live
//! here, the browser `localStorage` backend lives in the web bridge.

pub mod accounts;
pub mod file;
pub mod memory;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Teacher,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Tamil,
    Hindi,
}

impl Role {
    /// Parse the lowercase name used on the wire.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "student" => Some(Role::Student),
            "teacher" => Some(Role::Teacher),
            _ => None,
        }
    }
}

impl Language {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "english" => Some(Language::English),
            "tamil" => Some(Language::Tamil),
            "hindi" => Some(Language::Hindi),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    /// ISO-8601 date.
    pub earned_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certificate {
    pub id: String,
    pub subject: String,
    pub level: String,
    /// ISO-8601 date.
    pub earned_at: String,
}

/// The signed-in user, stored as one JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub grade: Option<u8>,
    #[serde(default)]
    pub preferred_language: Language,
    #[serde(default)]
    pub streak: u32,
    /// Students only.
    #[serde(default)]
    pub badges: Option<Vec<Badge>>,
    /// Students only.
    #[serde(default)]
    pub certificates: Option<Vec<Certificate>>,
    #[serde(default)]
    pub total_points: u32,
    #[serde(default)]
    pub games_completed: u32,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        let student = role == Role::Student;
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            role,
            grade: None,
            preferred_language: Language::English,
            streak: 0,
            badges: student.then(Vec::new),
            certificates: student.then(Vec::new),
            total_points: 0,
            games_completed: 0,
        }
    }

    pub fn with_grade(mut self, grade: u8) -> Self {
        self.grade = Some(grade);
        self
    }

    pub fn is_student(&self) -> bool {
        self.role == Role::Student
    }
}

/// Process-wide holder of the current user.
pub trait SessionStore {
    fn user(&self) -> Option<&User>;

    fn set_user(&mut self, user: User) -> Result<(), StoreError>;

    fn clear_user(&mut self) -> Result<(), StoreError>;

    /// Add earned points and completed games to the current user.
    fn update_progress(&mut self, points: u32, games_completed: u32) -> Result<(), StoreError> {
        let mut user = self.user().cloned().ok_or(StoreError::NoUser)?;
        user.total_points = user.total_points.saturating_add(points);
        user.games_completed = user.games_completed.saturating_add(games_completed);
        self.set_user(user)
    }
}
