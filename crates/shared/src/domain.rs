use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(UserId);
id_newtype!(DocId);
id_newtype!(CaseId);
id_newtype!(NotificationId);

// The backend stores these capitalized, so no serde rename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocType {
    Task,
    Support,
}

impl DocType {
    pub fn as_str(self) -> &'static str {
        match self {
            DocType::Task => "Task",
            DocType::Support => "Support",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    Admin,
    Lawyer,
    Staff,
    Paralegal,
}

impl UserRole {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "Admin" => Some(UserRole::Admin),
            "Lawyer" => Some(UserRole::Lawyer),
            "Staff" => Some(UserRole::Staff),
            "Paralegal" => Some(UserRole::Paralegal),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Mid,
    High,
}

impl Priority {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "Low" => Some(Priority::Low),
            "Mid" => Some(Priority::Mid),
            "High" => Some(Priority::High),
            _ => None,
        }
    }

    pub fn lead_days(self) -> u64 {
        match self {
            Priority::Low => 14,
            Priority::Mid => 5,
            Priority::High => 2,
        }
    }
}
