//! Favorite reconciliation and toggling over restaurant lists.
//!
//! These functions are pure: they never modify the input list or any of its
//! entries, and always hand back freshly built values.

use super::errors::{DomainError, DomainResult};
use super::models::{FavoriteIds, Restaurant, RestaurantId};

/// Applies a persisted favorite set to a freshly supplied list.
///
/// With no persisted set the entities pass through unchanged. Otherwise every
/// entity whose id is in `persisted` comes back flagged as favorite, and all
/// others come back as supplied. Order and length are those of `entities`;
/// persisted ids with no matching entity are ignored.
///
/// # Examples
///
/// ```
/// use restaurants::domain::{reconcile, FavoriteIds, Restaurant};
///
/// let entities = vec![Restaurant::new(1, "A", "a"), Restaurant::new(2, "B", "b")];
/// let persisted: FavoriteIds = vec![2, 99].into();
///
/// let merged = reconcile(&entities, Some(&persisted));
/// assert!(!merged[0].is_favorite);
/// assert!(merged[1].is_favorite);
/// ```
pub fn reconcile(entities: &[Restaurant], persisted: Option<&FavoriteIds>) -> Vec<Restaurant> {
    match persisted {
        None => entities.to_vec(),
        Some(ids) => entities
            .iter()
            .map(|restaurant| {
                if ids.contains(restaurant.id) {
                    restaurant.with_favorite(true)
                } else {
                    restaurant.clone()
                }
            })
            .collect(),
    }
}

/// Builds the list that results from flipping the favorite flag of `id`.
///
/// Returns the new list together with the toggled restaurant, or
/// [`DomainError::NotFound`] if no entry carries that id.
pub fn toggle(list: &[Restaurant], id: RestaurantId) -> DomainResult<(Vec<Restaurant>, Restaurant)> {
    let index = list
        .iter()
        .position(|restaurant| restaurant.id == id)
        .ok_or(DomainError::NotFound(id))?;

    let toggled = list[index].with_favorite(!list[index].is_favorite);
    let mut next = list.to_vec();
    next[index] = toggled.clone();

    Ok((next, toggled))
}

/// Records the new state of `restaurant` in the persisted favorite set.
pub fn apply_to_favorites(ids: &mut FavoriteIds, restaurant: &Restaurant) {
    if restaurant.is_favorite {
        ids.insert(restaurant.id);
    } else {
        ids.remove(restaurant.id);
    }
}

/// Ids of the favorite restaurants in `list`, in list order.
pub fn favorite_ids(list: &[Restaurant]) -> FavoriteIds {
    list.iter()
        .filter(|restaurant| restaurant.is_favorite)
        .map(|restaurant| restaurant.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Restaurant> {
        vec![
            Restaurant::new(1, "A", "first"),
            Restaurant::new(2, "B", "second"),
            Restaurant::new(3, "C", "third"),
        ]
    }

    #[test]
    fn test_reconcile_without_persisted_set_passes_through() {
        let mut entities = sample();
        entities[2] = entities[2].with_favorite(true);

        let merged = reconcile(&entities, None);
        assert_eq!(merged, entities);
    }

    #[test]
    fn test_reconcile_marks_persisted_ids() {
        let persisted: FavoriteIds = vec![2].into();
        let merged = reconcile(&sample(), Some(&persisted));

        let flags: Vec<(RestaurantId, bool)> = merged.iter().map(|r| (r.id, r.is_favorite)).collect();
        assert_eq!(flags, vec![(1, false), (2, true), (3, false)]);
    }

    #[test]
    fn test_reconcile_keeps_order_and_length() {
        let entities = vec![
            Restaurant::new(30, "Z", "z"),
            Restaurant::new(10, "X", "x"),
            Restaurant::new(20, "Y", "y"),
        ];
        let persisted: FavoriteIds = vec![20, 30].into();

        let merged = reconcile(&entities, Some(&persisted));
        let ids: Vec<RestaurantId> = merged.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![30, 10, 20]);
        assert_eq!(favorite_ids(&merged).sorted(), vec![20, 30]);
    }

    #[test]
    fn test_reconcile_ignores_stale_ids() {
        let persisted: FavoriteIds = vec![42, 3].into();
        let merged = reconcile(&sample(), Some(&persisted));

        assert_eq!(merged.len(), 3);
        assert_eq!(favorite_ids(&merged).as_slice(), &[3]);
    }

    #[test]
    fn test_reconcile_with_empty_persisted_set() {
        let persisted = FavoriteIds::new();
        let merged = reconcile(&sample(), Some(&persisted));
        assert!(favorite_ids(&merged).is_empty());
    }

    #[test]
    fn test_reconcile_does_not_touch_input() {
        let entities = sample();
        let persisted: FavoriteIds = vec![1, 2, 3].into();

        let _ = reconcile(&entities, Some(&persisted));
        assert!(entities.iter().all(|r| !r.is_favorite));
    }

    #[test]
    fn test_toggle_replaces_single_entry() {
        let list = sample();
        let (next, toggled) = toggle(&list, 2).unwrap();

        assert!(toggled.is_favorite);
        assert_eq!(next[1], toggled);
        assert_eq!(next[0], list[0]);
        assert_eq!(next[2], list[2]);
        assert!(!list[1].is_favorite);
    }

    #[test]
    fn test_toggle_twice_restores_flag() {
        let list = sample();
        let (once, _) = toggle(&list, 3).unwrap();
        let (twice, _) = toggle(&once, 3).unwrap();
        assert_eq!(twice, list);
    }

    #[test]
    fn test_toggle_unknown_id() {
        let result = toggle(&sample(), 99);
        assert_eq!(result.unwrap_err(), DomainError::NotFound(99));
    }

    #[test]
    fn test_toggle_on_empty_list() {
        assert!(toggle(&[], 0).is_err());
    }

    #[test]
    fn test_apply_to_favorites() {
        let mut ids: FavoriteIds = vec![5].into();

        apply_to_favorites(&mut ids, &Restaurant::new(1, "A", "a").with_favorite(true));
        apply_to_favorites(&mut ids, &Restaurant::new(1, "A", "a").with_favorite(true));
        assert_eq!(ids.sorted(), vec![1, 5]);

        apply_to_favorites(&mut ids, &Restaurant::new(5, "E", "e"));
        apply_to_favorites(&mut ids, &Restaurant::new(8, "H", "h"));
        assert_eq!(ids.as_slice(), &[1]);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn entities() -> impl Strategy<Value = Vec<Restaurant>> {
            proptest::collection::vec(-50i64..50, 0..20).prop_map(|raw| {
                FavoriteIds::from(raw)
                    .as_slice()
                    .iter()
                    .map(|&id| Restaurant::new(id, format!("R{id}"), "generated"))
                    .collect()
            })
        }

        proptest! {
            #[test]
            fn test_reconcile_flags_exactly_the_saved_ids(
                entities in entities(),
                saved in proptest::collection::vec(-60i64..60, 0..20),
            ) {
                let saved = FavoriteIds::from(saved);
                let reconciled = reconcile(&entities, Some(&saved));

                prop_assert_eq!(reconciled.len(), entities.len());
                for (after, before) in reconciled.iter().zip(&entities) {
                    prop_assert_eq!(after.id, before.id);
                    prop_assert_eq!(after.is_favorite, saved.contains(before.id));
                }
                prop_assert!(favorite_ids(&reconciled).as_slice().iter().all(|id| saved.contains(*id)));
            }

            #[test]
            fn test_reconcile_without_saved_set_passes_through(entities in entities()) {
                prop_assert_eq!(reconcile(&entities, None), entities);
            }

            #[test]
            fn test_toggle_is_an_involution(
                entities in entities().prop_filter("needs a restaurant", |e| !e.is_empty()),
                pick in any::<prop::sample::Index>(),
            ) {
                let id = entities[pick.index(entities.len())].id;
                let (once, toggled) = toggle(&entities, id).unwrap();
                let (twice, _) = toggle(&once, id).unwrap();

                prop_assert_eq!(toggled.is_favorite, !entities[pick.index(entities.len())].is_favorite);
                prop_assert_eq!(twice, entities);
            }
        }
    }
}
