use crate::bot::error::BotError;
use regex::Regex;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Characters allowed around the digits of a phone number.
static PHONE_FORMATTING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\-\(\)\+\.]").expect("phone formatting pattern"));

const PHONE_DIGITS: std::ops::RangeInclusive<usize> = 10..=15;

/// Phone numbers are 10 to 15 digits once spaces, dashes, parentheses,
/// pluses and dots are removed.
pub fn is_valid_phone(raw: &str) -> bool {
    let digits = PHONE_FORMATTING.replace_all(raw, "");
    !digits.is_empty()
        && digits.chars().all(|c| c.is_ascii_digit())
        && PHONE_DIGITS.contains(&digits.chars().count())
}

/// A contact name in its canonical form: first letter upper-case, the
/// rest lower-case. Two names equal up to case are the same user.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Username(String);

impl Username {
    pub fn new(raw: &str) -> Self {
        let lower = raw.to_lowercase();
        let mut chars = lower.chars();
        let canonical = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
        Username(canonical)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A phone number that passed [`is_valid_phone`], kept as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phone(String);

impl Phone {
    pub fn parse(raw: &str) -> Result<Self, BotError> {
        if is_valid_phone(raw) {
            Ok(Phone(raw.to_string()))
        } else {
            Err(BotError::InvalidPhone(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Phone {
    type Err = BotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Phone::parse(s)
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Username to phone mapping. Each user appears at most once.
#[derive(Debug, Clone, Default)]
pub struct ContactBook {
    contacts: BTreeMap<Username, Phone>,
}

impl ContactBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new user; an existing one is left untouched.
    pub fn add(&mut self, username: Username, phone: Phone) -> Result<(), BotError> {
        match self.contacts.entry(username) {
            Entry::Occupied(existing) => Err(BotError::AlreadyExists {
                username: existing.key().to_string(),
                phone: existing.get().to_string(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(phone);
                Ok(())
            }
        }
    }

    /// Replace the phone of an existing user.
    pub fn change(&mut self, username: &Username, phone: Phone) -> Result<(), BotError> {
        match self.contacts.get_mut(username) {
            Some(current) => {
                *current = phone;
                Ok(())
            }
            None => Err(BotError::DoesNotExist(username.to_string())),
        }
    }

    pub fn phone(&self, username: &Username) -> Option<&Phone> {
        self.contacts.get(username)
    }

    /// All contacts in username order.
    pub fn iter(&self) -> impl Iterator<Item = (&Username, &Phone)> {
        self.contacts.iter()
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }
}
