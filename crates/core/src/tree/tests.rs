use super::*;
use crate::model::{Gender, NewPerson};
use time::macros::datetime;

fn node(id: i64, first: &str) -> Person {
    Person::from_new(
        PersonId::new(id),
        NewPerson::named(first, "Test", Gender::Male),
        datetime!(2024-01-01 0:00 UTC),
    )
}

// 1 ─┬─ 2 ── 4
//    └─ 3
// 5
fn sample() -> Vec<Person> {
    let mut members = Vec::new();
    attach(&mut members, node(1, "one"), None).unwrap();
    attach(&mut members, node(5, "five"), None).unwrap();
    attach(&mut members, node(2, "two"), Some(PersonId::new(1))).unwrap();
    attach(&mut members, node(3, "three"), Some(PersonId::new(1))).unwrap();
    attach(&mut members, node(4, "four"), Some(PersonId::new(2))).unwrap();
    members
}

fn ids(members: &[Person]) -> Vec<i64> {
    walk(members).map(|v| v.person.id.get()).collect()
}

#[test]
fn walk_is_pre_order_with_depths_and_parents() {
    let members = sample();
    let visits = walk(&members)
        .map(|v| (v.person.id.get(), v.depth, v.parent.map(|p| p.id.get())))
        .collect::<Vec<_>>();
    assert_eq!(
        visits,
        vec![
            (1, 0, None),
            (2, 1, Some(1)),
            (4, 2, Some(2)),
            (3, 1, Some(1)),
            (5, 0, None),
        ]
    );
}

#[test]
fn attach_sets_parent_link_and_rejects_unknown_parent() {
    let mut members = sample();
    assert_eq!(
        find(&members, PersonId::new(4)).unwrap().parent_id,
        Some(PersonId::new(2))
    );
    assert_eq!(
        attach(&mut members, node(9, "nine"), Some(PersonId::new(42))),
        Err(TreeError::UnknownParent(PersonId::new(42)))
    );
    assert_eq!(count(&members), 5);
}

#[test]
fn depth_and_counts() {
    let members = sample();
    assert_eq!(max_depth(&members), 2);
    assert_eq!(max_depth(&[]), 0);
    assert_eq!(count(&members), 5);
    assert_eq!(count_at_level(&members, 0), 2);
    assert_eq!(count_at_level(&members, 1), 2);
    assert_eq!(count_at_level(&members, 2), 1);
    assert_eq!(count_at_level(&members, 3), 0);
    assert_eq!(depth_of(&members, PersonId::new(4)), Some(2));
    assert_eq!(depth_of(&members, PersonId::new(99)), None);
    let level_one = at_level(&members, 1)
        .into_iter()
        .map(|p| p.id.get())
        .collect::<Vec<_>>();
    assert_eq!(level_one, vec![2, 3]);
}

#[test]
fn descendants_are_found_at_any_depth() {
    let members = sample();
    let id = PersonId::new;
    assert!(is_descendant(&members, id(1), id(4)));
    assert!(is_descendant(&members, id(2), id(4)));
    assert!(!is_descendant(&members, id(4), id(1)));
    assert!(!is_descendant(&members, id(3), id(4)));
    assert!(!is_descendant(&members, id(1), id(1)));
    assert!(!is_descendant(&members, id(1), id(5)));
    assert!(!is_descendant(&members, id(42), id(4)));
}

#[test]
fn detach_removes_whole_subtree() {
    let mut members = sample();
    let removed = detach(&mut members, PersonId::new(2)).unwrap();
    assert_eq!(removed.children.len(), 1);
    assert_eq!(ids(&members), vec![1, 3, 5]);
    assert!(detach(&mut members, PersonId::new(4)).is_none());
}

#[test]
fn move_rejects_cycles_and_keeps_links_consistent() {
    let mut members = sample();
    assert_eq!(
        move_to(&mut members, PersonId::new(1), Some(PersonId::new(4))),
        Err(TreeError::WouldCreateCycle {
            person: PersonId::new(1),
            parent: PersonId::new(4)
        })
    );
    assert_eq!(
        move_to(&mut members, PersonId::new(2), Some(PersonId::new(2))),
        Err(TreeError::WouldCreateCycle {
            person: PersonId::new(2),
            parent: PersonId::new(2)
        })
    );

    move_to(&mut members, PersonId::new(2), Some(PersonId::new(5))).unwrap();
    assert_eq!(ids(&members), vec![1, 3, 5, 2, 4]);
    assert_eq!(
        parent_of(&members, PersonId::new(2)).map(|p| p.id),
        Some(PersonId::new(5))
    );
    assert_eq!(
        find(&members, PersonId::new(2)).unwrap().parent_id,
        Some(PersonId::new(5))
    );

    move_to(&mut members, PersonId::new(2), None).unwrap();
    assert_eq!(find(&members, PersonId::new(2)).unwrap().parent_id, None);
    assert_eq!(members.len(), 3);
}

#[test]
fn reassign_ids_remaps_parent_links() {
    let mut members = sample();
    let mut next_id = 100;
    reassign_ids(&mut members, &mut || {
        next_id += 1;
        PersonId::new(next_id)
    });
    assert_eq!(ids(&members), vec![101, 102, 103, 104, 105]);
    assert_eq!(
        find(&members, PersonId::new(103)).unwrap().parent_id,
        Some(PersonId::new(102))
    );
    assert_eq!(find(&members, PersonId::new(105)).unwrap().parent_id, None);
}

#[test]
fn relink_and_duplicate_detection() {
    let mut members = sample();
    members[0].children[0].parent_id = Some(PersonId::new(77));
    relink_parents(&mut members);
    assert_eq!(
        find(&members, PersonId::new(2)).unwrap().parent_id,
        Some(PersonId::new(1))
    );
    assert_eq!(first_duplicate_id(&members), None);

    members[1].children.push(node(3, "again"));
    assert_eq!(first_duplicate_id(&members), Some(PersonId::new(3)));
}
