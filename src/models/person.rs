//! Person and roster models.
//!
//! This module defines the [`Person`] record, the [`Roster`] collection and
//! the gender/status enums used for eligibility checks.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A person's recorded gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    /// Female.
    Female,
    /// Male.
    Male,
    /// Not recorded.
    Unspecified,
}

/// Which people a leave category may be placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenderRestriction {
    /// Female-only leave (e.g. maternity).
    Female,
    /// Male-only leave.
    Male,
    /// No restriction.
    #[default]
    #[serde(alias = "all", alias = "none")]
    Any,
}

impl GenderRestriction {
    /// Returns true if a person of `gender` satisfies this restriction.
    pub fn admits(&self, gender: Gender) -> bool {
        match self {
            GenderRestriction::Female => gender == Gender::Female,
            GenderRestriction::Male => gender == Gender::Male,
            GenderRestriction::Any => true,
        }
    }
}

impl fmt::Display for GenderRestriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GenderRestriction::Female => "female",
            GenderRestriction::Male => "male",
            GenderRestriction::Any => "any",
        };
        f.write_str(label)
    }
}

/// Employment status; only active people take part in a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    /// Currently employed and rostered.
    #[default]
    Active,
    /// On the books but not rostered.
    Inactive,
}

/// A rostered person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Unique identifier for the person.
    pub id: String,
    /// Optional display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Recorded gender.
    pub gender: Gender,
    /// Employment status.
    #[serde(default)]
    pub status: EmploymentStatus,
}

impl Person {
    /// Creates an active person with no display name.
    pub fn new(id: impl Into<String>, gender: Gender) -> Self {
        Self {
            id: id.into(),
            name: None,
            gender,
            status: EmploymentStatus::Active,
        }
    }

    /// Returns true if the person is active.
    pub fn is_active(&self) -> bool {
        self.status == EmploymentStatus::Active
    }

    /// Returns true if the person is active and satisfies `restriction`.
    ///
    /// # Examples
    ///
    /// ```
    /// use leave_sim::models::{Gender, GenderRestriction, Person};
    ///
    /// let person = Person::new("F001", Gender::Female);
    /// assert!(person.is_eligible_for(GenderRestriction::Female));
    /// assert!(person.is_eligible_for(GenderRestriction::Any));
    /// assert!(!person.is_eligible_for(GenderRestriction::Male));
    /// ```
    pub fn is_eligible_for(&self, restriction: GenderRestriction) -> bool {
        self.is_active() && restriction.admits(self.gender)
    }
}

/// An immutable, ordered set of people with unique ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Roster {
    people: Vec<Person>,
}

impl Roster {
    /// Builds a roster, rejecting empty or duplicate ids.
    pub fn new(people: Vec<Person>) -> EngineResult<Self> {
        let mut seen = HashSet::with_capacity(people.len());
        for person in &people {
            if person.id.trim().is_empty() {
                return Err(EngineError::InvalidRoster {
                    field: "id".to_string(),
                    message: "person id must not be empty".to_string(),
                });
            }
            if !seen.insert(person.id.as_str()) {
                return Err(EngineError::InvalidRoster {
                    field: "id".to_string(),
                    message: format!("duplicate id '{}'", person.id),
                });
            }
        }
        Ok(Self { people })
    }

    /// Builds a synthetic roster of `size` active people, the first
    /// `round(size × female_ratio)` female (`F001`, ...) and the rest male
    /// (`M001`, ...).
    ///
    /// # Examples
    ///
    /// ```
    /// use leave_sim::models::Roster;
    ///
    /// let roster = Roster::sample(10, 0.3);
    /// assert_eq!(roster.len(), 10);
    /// assert_eq!(roster.people()[0].id, "F001");
    /// assert_eq!(roster.people()[3].id, "M001");
    /// assert_eq!(roster.headcount().female, 3);
    /// ```
    pub fn sample(size: usize, female_ratio: f64) -> Self {
        let females = ((size as f64) * female_ratio.clamp(0.0, 1.0)).round() as usize;
        let females = females.min(size);
        let people = (0..females)
            .map(|i| Person {
                id: format!("F{:03}", i + 1),
                name: Some(format!("Female{} Test{}", i + 1, i + 1)),
                gender: Gender::Female,
                status: EmploymentStatus::Active,
            })
            .chain((0..size - females).map(|i| Person {
                id: format!("M{:03}", i + 1),
                name: Some(format!("Male{} Test{}", i + 1, i + 1)),
                gender: Gender::Male,
                status: EmploymentStatus::Active,
            }))
            .collect();
        Self { people }
    }

    /// All people in roster order.
    pub fn people(&self) -> &[Person] {
        &self.people
    }

    /// Number of people, active or not.
    pub fn len(&self) -> usize {
        self.people.len()
    }

    /// Returns true if the roster has nobody on it.
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// Looks a person up by id.
    pub fn get(&self, id: &str) -> Option<&Person> {
        self.people.iter().find(|p| p.id == id)
    }

    /// Roster indices of active people satisfying `restriction`.
    pub fn eligible_indices(&self, restriction: GenderRestriction) -> Vec<usize> {
        self.people
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_eligible_for(restriction))
            .map(|(i, _)| i)
            .collect()
    }

    /// Active population broken down by gender.
    pub fn headcount(&self) -> Headcount {
        Headcount::from_roster(self)
    }
}

impl<'de> Deserialize<'de> for Roster {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let people = Vec::<Person>::deserialize(deserializer)?;
        Roster::new(people).map_err(serde::de::Error::custom)
    }
}

/// Active population counts used as coverage denominators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headcount {
    /// Active females.
    pub female: usize,
    /// Active males.
    pub male: usize,
    /// Active people with no recorded gender.
    pub unspecified: usize,
}

impl Headcount {
    /// Counts the active people on a roster.
    pub fn from_roster(roster: &Roster) -> Self {
        roster
            .people()
            .iter()
            .filter(|p| p.is_active())
            .fold(Headcount::default(), |mut acc, p| {
                match p.gender {
                    Gender::Female => acc.female += 1,
                    Gender::Male => acc.male += 1,
                    Gender::Unspecified => acc.unspecified += 1,
                }
                acc
            })
    }

    /// All active people.
    pub fn total(&self) -> usize {
        self.female + self.male + self.unspecified
    }

    /// Active people satisfying `restriction`.
    pub fn eligible(&self, restriction: GenderRestriction) -> usize {
        match restriction {
            GenderRestriction::Female => self.female,
            GenderRestriction::Male => self.male,
            GenderRestriction::Any => self.total(),
        }
    }
}
