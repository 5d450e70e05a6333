use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub type RestaurantId = i64;

/// Shared snapshot of the restaurant list.
///
/// Each published snapshot is a new allocation, so `Arc::ptr_eq` tells a
/// consumer whether the list changed since it last looked.
pub type RestaurantList = Arc<Vec<Restaurant>>;

/// Key under which the favorite ids are persisted.
pub const FAVORITES_KEY: &str = "favorites";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restaurant {
    pub id: RestaurantId,
    pub title: String,
    pub description: String,
    pub is_favorite: bool,
}

impl Restaurant {
    pub fn new(id: RestaurantId, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            is_favorite: false,
        }
    }

    /// Returns a copy of this restaurant with the favorite flag set to `favorite`.
    pub fn with_favorite(&self, favorite: bool) -> Self {
        Self {
            is_favorite: favorite,
            ..self.clone()
        }
    }
}

/// Ordered sequence of favorite restaurant ids with set semantics.
///
/// Order is insertion order and carries no meaning; an id appears at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<RestaurantId>", into = "Vec<RestaurantId>")]
pub struct FavoriteIds(Vec<RestaurantId>);

impl FavoriteIds {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn contains(&self, id: RestaurantId) -> bool {
        self.0.contains(&id)
    }

    /// Adds `id`, returning false when it was already present.
    pub fn insert(&mut self, id: RestaurantId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.0.push(id);
        true
    }

    /// Removes `id`, returning false when it was absent.
    pub fn remove(&mut self, id: RestaurantId) -> bool {
        let before = self.0.len();
        self.0.retain(|existing| *existing != id);
        self.0.len() != before
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[RestaurantId] {
        &self.0
    }

    /// The ids sorted ascending, for order-independent comparison.
    pub fn sorted(&self) -> Vec<RestaurantId> {
        let mut ids = self.0.clone();
        ids.sort_unstable();
        ids
    }
}

impl From<Vec<RestaurantId>> for FavoriteIds {
    fn from(ids: Vec<RestaurantId>) -> Self {
        ids.into_iter().collect()
    }
}

impl From<FavoriteIds> for Vec<RestaurantId> {
    fn from(ids: FavoriteIds) -> Self {
        ids.0
    }
}

impl FromIterator<RestaurantId> for FavoriteIds {
    fn from_iter<I: IntoIterator<Item = RestaurantId>>(iter: I) -> Self {
        let mut set = FavoriteIds::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

/// The built-in list shown before, or instead of, a remote fetch.
pub fn dummy_restaurants() -> Vec<Restaurant> {
    vec![
        Restaurant::new(
            0,
            "Alfredo foods",
            "At Alfredo's you will find that we host a multitude of delicious Italian flavors ingrained in our pasta's and pizza's",
        ),
        Restaurant::new(
            1,
            "The Whisk & Ladle",
            "A cozy bistro specializing in French-inspired comfort food. Savor deliciously creamy soups, artisanal bread, and decadent desserts while enjoying the rustic charm of our candlelit dining room",
        ),
        Restaurant::new(
            2,
            "Spice Fusion",
            "Embark on a culinary journey through Asia at Spice Fusion. Experience the perfect blend of flavors from Thai, Indian, and Chinese cuisines, expertly crafted into mouthwatering dishes that will transport your taste buds.",
        ),
        Restaurant::new(
            3,
            "Bella Napoli Pizzeria",
            "Indulge in the authentic taste of Italy at Bella Napoli. Our wood-fired pizzas, made with imported ingredients and traditional Neapolitan techniques, will transport you to the bustling streets of Naples.",
        ),
        Restaurant::new(
            4,
            "The Garden Grill",
            "A haven for health-conscious foodies, The Garden Grill offers a delightful range of organic, farm-to-table dishes. Enjoy freshly harvested ingredients creatively prepared into nourishing salads, hearty bowls, and vibrant smoothies.",
        ),
        Restaurant::new(
            5,
            "Sea Salt & Vine",
            "Set sail on a seafood adventure at Sea Salt & Vine. Immerse yourself in the ocean's bounty with our exquisite selection of freshly caught fish, succulent shellfish, and perfectly paired wines, all while overlooking breathtaking waterfront views.",
        ),
        Restaurant::new(
            6,
            "The Green Leaf Café",
            "A plant-based paradise for vegans and vegetarians, The Green Leaf Café serves up a delightful array of innovative meat-free dishes. From colorful Buddha bowls to mouthwatering plant-based burgers, each creation celebrates the wonders of vegetables.",
        ),
        Restaurant::new(
            7,
            "Tandoori Tales",
            "Experience the vibrant flavors of India at Tandoori Tales. Our aromatic spices and tandoor oven-cooked dishes will transport you to the bustling streets of Mumbai, where every bite is an explosion of taste and tradition.",
        ),
        Restaurant::new(
            8,
            "Le Boulangerie Patisserie",
            "Step into a French patisserie where the air is filled with the aroma of freshly baked bread and pastries. Le Boulangerie Patisserie offers a delectable selection of croissants, macarons, and éclairs, paired perfectly with a cup of rich coffee.",
        ),
        Restaurant::new(
            9,
            "Smokehouse BBQ",
            "For lovers of smoky, slow-cooked meats, Smokehouse BBQ is the ultimate destination. Indulge in tender ribs, juicy brisket, and mouthwatering pulled pork, all accompanied by our signature homemade barbecue sauces.",
        ),
        Restaurant::new(
            10,
            "Sushi Sensations",
            "Dive into a world of sushi mastery at Sushi Sensations. Our skilled chefs create edible works of art using the freshest ingredients, presenting a fusion of traditional and contemporary sushi rolls that will delight both your eyes and palate.",
        ),
        Restaurant::new(
            11,
            "The Spice Market",
            "Embark on a culinary adventure to the vibrant streets of Morocco, India, and beyond at The Spice Market. Immerse yourself in the rich aromas and bold flavors of North African and South Asian cuisine, where exotic spices reign supreme.",
        ),
        Restaurant::new(
            12,
            "La Dolce Vita Gelateria",
            "Transport yourself to the sun-kissed streets of Italy with a visit to La Dolce Vita Gelateria. Indulge in creamy gelato crafted from traditional recipes, featuring luscious flavors like pistachio, tiramisu, and fruity sorbets.",
        ),
        Restaurant::new(
            13,
            "The Rustic Vineyard",
            "Nestled amidst rolling vineyards, The Rustic Vineyard offers a memorable wine country dining experience. Pair exquisite local wines with artisanal cheese platters, freshly baked bread, and gourmet charcuterie, all while enjoying breathtaking vineyard views.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_restaurant_is_not_favorite() {
        let restaurant = Restaurant::new(7, "A", "first");
        assert!(!restaurant.is_favorite);
    }

    #[test]
    fn test_with_favorite_leaves_original_untouched() {
        let original = Restaurant::new(1, "A", "first");
        let flagged = original.with_favorite(true);

        assert!(flagged.is_favorite);
        assert!(!original.is_favorite);
        assert_eq!(flagged.id, original.id);
        assert_eq!(flagged.title, original.title);
    }

    #[test]
    fn test_favorite_ids_never_hold_duplicates() {
        let mut ids = FavoriteIds::new();
        assert!(ids.insert(3));
        assert!(!ids.insert(3));
        assert_eq!(ids.as_slice(), &[3]);

        let collected: FavoriteIds = vec![2, 2, 5, 2].into();
        assert_eq!(collected.as_slice(), &[2, 5]);
    }

    #[test]
    fn test_favorite_ids_remove_absent_is_noop() {
        let mut ids: FavoriteIds = vec![1, 2].into();
        assert!(!ids.remove(9));
        assert!(ids.remove(1));
        assert_eq!(ids.as_slice(), &[2]);
    }

    #[test]
    fn test_favorite_ids_serialize_as_plain_array() {
        let ids: FavoriteIds = vec![4, 1].into();
        assert_eq!(serde_json::to_string(&ids).unwrap(), "[4,1]");

        let parsed: FavoriteIds = serde_json::from_str("[1,1,2]").unwrap();
        assert_eq!(parsed.as_slice(), &[1, 2]);
    }

    #[test]
    fn test_dummy_restaurants_have_unique_ids() {
        let restaurants = dummy_restaurants();
        assert_eq!(restaurants.len(), 14);

        let ids: FavoriteIds = restaurants.iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), restaurants.len());
        assert!(restaurants.iter().all(|r| !r.is_favorite));
    }
}
