use serde::{Deserialize, Serialize};

/// One row of the teacher's student table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProgress {
    pub student_id: String,
    pub student_name: String,
    pub grade: u8,
    pub total_points: u32,
    pub completed_games: u32,
    /// Mean quiz percentage, 0..=100.
    pub average_score: u32,
    pub streak: u32,
    /// ISO-8601 date of last activity.
    pub last_active: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectAverage {
    pub subject: String,
    pub average: u32,
}

/// Headline numbers for the dashboard overview tab.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassOverview {
    pub students: usize,
    pub total_points: u32,
    pub average_score: u32,
    pub completed_games: u32,
    pub longest_streak: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    pub students: Vec<StudentProgress>,
    #[serde(default)]
    pub subject_averages: Vec<SubjectAverage>,
}

impl Roster {
    /// Parse a roster from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The sample class shown before any real data exists.
    pub fn demo() -> Self {
        let row = |id: &str, name: &str, grade, points, games, avg, streak, last: &str| StudentProgress {
            student_id: id.into(),
            student_name: name.into(),
            grade,
            total_points: points,
            completed_games: games,
            average_score: avg,
            streak,
            last_active: last.into(),
        };
        let subject = |name: &str, average| SubjectAverage { subject: name.into(), average };
        Self {
            students: vec![
                row("1", "Priya Sharma", 8, 1250, 15, 85, 7, "2024-01-15"),
                row("2", "Rahul Kumar", 9, 980, 12, 78, 3, "2024-01-14"),
                row("3", "Meera Patel", 10, 1450, 18, 92, 12, "2024-01-15"),
                row("4", "Arjun Singh", 7, 750, 8, 65, 1, "2024-01-13"),
            ],
            subject_averages: vec![
                subject("Science", 85),
                subject("Mathematics", 78),
                subject("Technology", 82),
                subject("Engineering", 75),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    pub fn total_points(&self) -> u32 {
        self.students.iter().map(|s| s.total_points).sum()
    }

    pub fn total_completed(&self) -> u32 {
        self.students.iter().map(|s| s.completed_games).sum()
    }

    /// Rounded mean of the students' average scores; 0 for an empty class.
    pub fn average_score(&self) -> u32 {
        if self.students.is_empty() {
            return 0;
        }
        let sum: u32 = self.students.iter().map(|s| s.average_score).sum();
        (sum as f64 / self.students.len() as f64).round() as u32
    }

    /// Case-insensitive substring match on the student's name.
    pub fn search(&self, query: &str) -> Vec<&StudentProgress> {
        let needle = query.trim().to_lowercase();
        self.students
            .iter()
            .filter(|s| s.student_name.to_lowercase().contains(&needle))
            .collect()
    }

    /// The `n` students with the most points, best first.
    pub fn top_performers(&self, n: usize) -> Vec<&StudentProgress> {
        let mut ranked: Vec<&StudentProgress> = self.students.iter().collect();
        ranked.sort_by(|a, b| b.total_points.cmp(&a.total_points));
        ranked.truncate(n);
        ranked
    }

    /// Number of students whose last activity was on `date` (YYYY-MM-DD).
    pub fn active_on(&self, date: &str) -> usize {
        self.students.iter().filter(|s| s.last_active == date).count()
    }

    pub fn overview(&self) -> ClassOverview {
        ClassOverview {
            students: self.len(),
            total_points: self.total_points(),
            average_score: self.average_score(),
            completed_games: self.total_completed(),
            longest_streak: self.students.iter().map(|s| s.streak).max().unwrap_or(0),
        }
    }
}
