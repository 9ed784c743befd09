#![forbid(unsafe_code)]

//! Recursive operations over a family's forest of person nodes.
//!
//! Nesting is the source of truth for parentage: every helper that inserts or
//! moves a node rewrites `parent_id` to match its new position.

use crate::error::TreeError;
use crate::ids::PersonId;
use crate::model::Person;
use std::collections::HashSet;

#[derive(Clone, Copy, Debug)]
pub struct Visit<'a> {
    pub depth: usize,
    pub parent: Option<&'a Person>,
    pub person: &'a Person,
}

/// Pre-order traversal, roots first, children in stored order.
pub struct Walk<'a> {
    stack: Vec<Visit<'a>>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = Visit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let visit = self.stack.pop()?;
        for child in visit.person.children.iter().rev() {
            self.stack.push(Visit {
                depth: visit.depth + 1,
                parent: Some(visit.person),
                person: child,
            });
        }
        Some(visit)
    }
}

pub fn walk(members: &[Person]) -> Walk<'_> {
    let stack = members
        .iter()
        .rev()
        .map(|person| Visit {
            depth: 0,
            parent: None,
            person,
        })
        .collect();
    Walk { stack }
}

pub fn find(members: &[Person], id: PersonId) -> Option<&Person> {
    for person in members {
        if person.id == id {
            return Some(person);
        }
        if let Some(found) = find(&person.children, id) {
            return Some(found);
        }
    }
    None
}

pub fn find_mut(members: &mut [Person], id: PersonId) -> Option<&mut Person> {
    for person in members.iter_mut() {
        if person.id == id {
            return Some(person);
        }
        if let Some(found) = find_mut(&mut person.children, id) {
            return Some(found);
        }
    }
    None
}

pub fn contains(members: &[Person], id: PersonId) -> bool {
    find(members, id).is_some()
}

/// True when `candidate` sits somewhere below `ancestor`.
pub fn is_descendant(members: &[Person], ancestor: PersonId, candidate: PersonId) -> bool {
    find(members, ancestor).is_some_and(|node| contains(&node.children, candidate))
}

pub fn depth_of(members: &[Person], id: PersonId) -> Option<usize> {
    walk(members)
        .find(|visit| visit.person.id == id)
        .map(|visit| visit.depth)
}

pub fn parent_of(members: &[Person], id: PersonId) -> Option<&Person> {
    walk(members)
        .find(|visit| visit.person.id == id)
        .and_then(|visit| visit.parent)
}

/// Deepest level below the roots; a forest of lone roots (or an empty one) is 0.
pub fn max_depth(members: &[Person]) -> usize {
    members.iter().map(subtree_depth).max().unwrap_or(0)
}

fn subtree_depth(person: &Person) -> usize {
    person
        .children
        .iter()
        .map(|child| 1 + subtree_depth(child))
        .max()
        .unwrap_or(0)
}

pub fn count(members: &[Person]) -> usize {
    members
        .iter()
        .map(|person| 1 + count(&person.children))
        .sum()
}

pub fn at_level(members: &[Person], level: usize) -> Vec<&Person> {
    walk(members)
        .filter(|visit| visit.depth == level)
        .map(|visit| visit.person)
        .collect()
}

pub fn count_at_level(members: &[Person], level: usize) -> usize {
    walk(members).filter(|visit| visit.depth == level).count()
}

/// Inserts `person` as a root or as the last child of `parent`.
pub fn attach(
    members: &mut Vec<Person>,
    mut person: Person,
    parent: Option<PersonId>,
) -> Result<(), TreeError> {
    let Some(parent_id) = parent else {
        person.parent_id = None;
        members.push(person);
        return Ok(());
    };
    let Some(parent) = find_mut(members, parent_id) else {
        return Err(TreeError::UnknownParent(parent_id));
    };
    person.parent_id = Some(parent_id);
    parent.children.push(person);
    Ok(())
}

/// Removes a node together with its whole subtree.
pub fn detach(members: &mut Vec<Person>, id: PersonId) -> Option<Person> {
    if let Some(pos) = members.iter().position(|person| person.id == id) {
        return Some(members.remove(pos));
    }
    for person in members.iter_mut() {
        if let Some(found) = detach(&mut person.children, id) {
            return Some(found);
        }
    }
    None
}

/// Re-parents a subtree. `None` promotes it to a root.
pub fn move_to(
    members: &mut Vec<Person>,
    id: PersonId,
    new_parent: Option<PersonId>,
) -> Result<(), TreeError> {
    let Some(node) = find(members, id) else {
        return Err(TreeError::UnknownPerson(id));
    };
    if node.parent_id == new_parent {
        return Ok(());
    }
    if let Some(parent_id) = new_parent {
        if parent_id == id || is_descendant(members, id, parent_id) {
            return Err(TreeError::WouldCreateCycle {
                person: id,
                parent: parent_id,
            });
        }
        if !contains(members, parent_id) {
            return Err(TreeError::UnknownParent(parent_id));
        }
    }
    let Some(node) = detach(members, id) else {
        return Err(TreeError::UnknownPerson(id));
    };
    attach(members, node, new_parent)
}

/// Rewrites every `parent_id` from the nesting.
pub fn relink_parents(members: &mut [Person]) {
    relink(members, None);
}

fn relink(members: &mut [Person], parent: Option<PersonId>) {
    for person in members.iter_mut() {
        person.parent_id = parent;
        let id = person.id;
        relink(&mut person.children, Some(id));
    }
}

/// Gives every node a fresh id from `next` and relinks parents to the new ids.
pub fn reassign_ids(members: &mut [Person], next: &mut impl FnMut() -> PersonId) {
    assign(members, next);
    relink_parents(members);
}

fn assign(members: &mut [Person], next: &mut impl FnMut() -> PersonId) {
    for person in members.iter_mut() {
        person.id = next();
        assign(&mut person.children, next);
    }
}

pub fn first_duplicate_id(members: &[Person]) -> Option<PersonId> {
    let mut seen = HashSet::new();
    walk(members)
        .map(|visit| visit.person.id)
        .find(|id| !seen.insert(*id))
}

#[cfg(test)]
mod tests;
