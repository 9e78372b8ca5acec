mod id;
mod name;

pub use self::{id::*, name::*};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

use destructure::Destructure;
use vodca::References;

use crate::KernelError;

/// Identity, equality and the natural order are all the author id.
/// Use `order_authors_by_name` for the alphabetical listing.
#[derive(Debug, Clone, References, Destructure)]
pub struct Author {
    id: AuthorId,
    full_name: AuthorName,
    coauthors: BTreeSet<AuthorId>,
}

impl Author {
    pub fn new(id: AuthorId, full_name: AuthorName) -> Self {
        Self {
            id,
            full_name,
            coauthors: BTreeSet::new(),
        }
    }

    /// Validates raw values, used by readers and row mappers.
    pub fn from_raw(
        id: impl Into<i64>,
        full_name: impl Into<String>,
    ) -> error_stack::Result<Self, KernelError> {
        Ok(Self::new(AuthorId::new(id)?, AuthorName::new(full_name)?))
    }

    pub fn set_full_name(&mut self, full_name: AuthorName) {
        self.full_name = full_name;
    }

    /// Records `other` as a coauthor of `self` only. Adding oneself is ignored.
    pub fn add_coauthor(&mut self, other: &Author) {
        if other.id == self.id {
            return;
        }
        self.coauthors.insert(other.id);
    }

    pub fn check_if_this_author_coauthored_with(&self, other: &Author) -> bool {
        self.coauthors.contains(&other.id)
    }
}

impl PartialEq for Author {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Author {}

impl Hash for Author {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for Author {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Author {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl Display for Author {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "<Author {}, author id = {}>", self.full_name, self.id)
    }
}

#[cfg(test)]
mod test {
    use std::collections::BTreeSet;

    use crate::entity::{Author, AuthorId, AuthorName};
    use crate::KernelError;

    #[test]
    fn construction_keeps_values() -> error_stack::Result<(), KernelError> {
        let author = Author::from_raw(3675, "J.R.R. Tolkien")?;
        assert_eq!(author.to_string(), "<Author J.R.R. Tolkien, author id = 3675>");
        assert_eq!(author.id(), &AuthorId::new(3675)?);
        assert_eq!(author.full_name(), &AuthorName::new("J.R.R. Tolkien")?);

        let zero = Author::from_raw(0, "  J.R.R. Tolkien ")?;
        assert_eq!(zero.to_string(), "<Author J.R.R. Tolkien, author id = 0>");
        Ok(())
    }

    #[test]
    fn invalid_values_are_rejected() {
        let negative = Author::from_raw(-1, "J.R.R. Tolkien").unwrap_err();
        assert_eq!(negative.current_context(), &KernelError::Validation);
        let blank = Author::from_raw(123, "  ").unwrap_err();
        assert_eq!(blank.current_context(), &KernelError::Validation);
    }

    #[test]
    fn identity_is_the_id() -> error_stack::Result<(), KernelError> {
        let jolie = Author::from_raw(1, "Angelina Jolie")?;
        let other_jolie = Author::from_raw(2, "Angelina Jolie")?;
        let rowling = Author::from_raw(1, "J.K. Rowling")?;
        assert_eq!(jolie, rowling);
        assert_ne!(jolie, other_jolie);
        assert_ne!(rowling, other_jolie);
        Ok(())
    }

    #[test]
    fn natural_order_is_by_id() -> error_stack::Result<(), KernelError> {
        let gaiman = Author::from_raw(1, "Neil Gaiman")?;
        let rowling = Author::from_raw(2, "J.K. Rowling")?;
        let tolkien = Author::from_raw(3, "J.R.R. Tolkien")?;
        assert!(gaiman < rowling);
        assert!(gaiman < tolkien);
        assert!(tolkien > rowling);

        let set = [
            Author::from_raw(13, "J.R.R. Tolkien")?,
            Author::from_raw(2, "Neil Gaiman")?,
            Author::from_raw(98, "J.K. Rowling")?,
        ]
        .into_iter()
        .collect::<BTreeSet<_>>();
        let listed = set.iter().map(ToString::to_string).collect::<Vec<_>>();
        assert_eq!(
            listed,
            vec![
                "<Author Neil Gaiman, author id = 2>",
                "<Author J.R.R. Tolkien, author id = 13>",
                "<Author J.K. Rowling, author id = 98>",
            ]
        );
        Ok(())
    }

    #[test]
    fn coauthors_are_directed() -> error_stack::Result<(), KernelError> {
        let mut gaiman = Author::from_raw(1, "Neil Gaiman")?;
        let mut rowling = Author::from_raw(2, "J.K. Rowling")?;
        let tolkien = Author::from_raw(3, "J.R.R. Tolkien")?;
        let obama = Author::from_raw(4, "Barack Obama")?;
        gaiman.add_coauthor(&rowling);
        gaiman.add_coauthor(&tolkien);
        assert!(gaiman.check_if_this_author_coauthored_with(&rowling));
        assert!(gaiman.check_if_this_author_coauthored_with(&tolkien));
        assert!(!gaiman.check_if_this_author_coauthored_with(&obama));
        assert!(!rowling.check_if_this_author_coauthored_with(&gaiman));

        rowling.add_coauthor(&gaiman);
        assert!(rowling.check_if_this_author_coauthored_with(&gaiman));
        Ok(())
    }

    #[test]
    fn self_is_never_a_coauthor() -> error_stack::Result<(), KernelError> {
        let mut gaiman = Author::from_raw(1, "Neil Gaiman")?;
        let same = gaiman.clone();
        gaiman.add_coauthor(&same);
        assert!(!gaiman.check_if_this_author_coauthored_with(&same));
        assert!(gaiman.coauthors().is_empty());
        Ok(())
    }

    #[test]
    fn full_name_is_mutable() -> error_stack::Result<(), KernelError> {
        let mut author = Author::from_raw(3675, "Barack Obama")?;
        author.set_full_name(AuthorName::new("J.R.R. Tolkien")?);
        assert_eq!(author.to_string(), "<Author J.R.R. Tolkien, author id = 3675>");
        Ok(())
    }
}
