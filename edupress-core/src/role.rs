//! User roles

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::gate::View;
use crate::Error;

/// Role of a signed-in user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Teacher,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Student, Role::Teacher, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Teacher => "teacher",
            Role::Admin => "admin",
        }
    }

    /// Parse a role name, ignoring case. Anything else is not a role.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "student" => Some(Role::Student),
            "teacher" => Some(Role::Teacher),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    /// The view a user of this role lands on when sent "home"
    pub fn home_view(&self) -> View {
        match self {
            Role::Admin => View::AdminDashboard,
            Role::Teacher => View::TeacherDashboard,
            Role::Student => View::StudentDashboard,
        }
    }

    fn bit(&self) -> u8 {
        match self {
            Role::Student => 0b001,
            Role::Teacher => 0b010,
            Role::Admin => 0b100,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::parse(s).ok_or_else(|| Error::UnknownRole(s.to_string()))
    }
}

/// A set of roles allowed to reach a view.
///
/// The empty set admits any authenticated user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RoleSet(u8);

impl RoleSet {
    /// Any authenticated user
    pub const ANY: RoleSet = RoleSet(0);
    pub const STUDENT: RoleSet = RoleSet(0b001);
    pub const TEACHER: RoleSet = RoleSet(0b010);
    pub const ADMIN: RoleSet = RoleSet(0b100);
    pub const STAFF: RoleSet = RoleSet(0b110);
    pub const EVERYONE: RoleSet = RoleSet(0b111);

    pub fn only(role: Role) -> Self {
        RoleSet(role.bit())
    }

    pub fn with(self, role: Role) -> Self {
        RoleSet(self.0 | role.bit())
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0 & role.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        Role::ALL.into_iter().filter(|r| self.contains(*r))
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        iter.into_iter().fold(RoleSet::ANY, RoleSet::with)
    }
}

impl From<Role> for RoleSet {
    fn from(role: Role) -> Self {
        RoleSet::only(role)
    }
}
