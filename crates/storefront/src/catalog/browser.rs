//! Category → subcategory → item navigation.
//!
//! The browser's whole state lives in the query string, so every view,
//! breadcrumb and back link is a plain URL. Following a breadcrumb or the
//! back link drops the search text but keeps sort order and layout.

use serde::Deserialize;

use super::filter::{self, Needle, SortOrder};
use crate::data::{Category, Item, MockBackend, Subcategory};

const BASE_PATH: &str = "/categories";

/// Raw query parameters for `/categories`.
#[derive(Debug, Default, Deserialize)]
pub struct BrowseQuery {
    pub view: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub q: Option<String>,
    pub sort: Option<String>,
    pub layout: Option<String>,
}

/// Which level of the catalog is on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// All categories.
    Categories,
    /// Subcategories and items of one category.
    Subcategories { category: String },
    /// Items of one subcategory.
    Items {
        category: String,
        subcategory: String,
    },
}

impl View {
    /// Resolve the view from query parameters.
    ///
    /// An explicit `view` wins when its required names are present;
    /// otherwise the deepest level the names allow is used.
    fn resolve(view: Option<&str>, category: Option<String>, subcategory: Option<String>) -> Self {
        let category = category.filter(|c| !c.trim().is_empty());
        let subcategory = subcategory.filter(|s| !s.trim().is_empty());

        match (view, category, subcategory) {
            (Some("categories"), _, _) | (_, None, _) => Self::Categories,
            (Some("subcategories"), Some(category), _) | (_, Some(category), None) => {
                Self::Subcategories { category }
            }
            (_, Some(category), Some(subcategory)) => Self::Items {
                category,
                subcategory,
            },
        }
    }

    const fn name(&self) -> &'static str {
        match self {
            Self::Categories => "categories",
            Self::Subcategories { .. } => "subcategories",
            Self::Items { .. } => "items",
        }
    }

    /// The view one level up, if any.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        match self {
            Self::Categories => None,
            Self::Subcategories { .. } => Some(Self::Categories),
            Self::Items { category, .. } => Some(Self::Subcategories {
                category: category.clone(),
            }),
        }
    }
}

/// Grid or list presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    #[default]
    Grid,
    List,
}

impl Layout {
    fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("list") => Self::List,
            _ => Self::Grid,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::List => "list",
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Grid => Self::List,
            Self::List => Self::Grid,
        }
    }
}

/// One entry of the breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    pub name: String,
    pub href: String,
    /// The crumb for the page being shown; rendered without a link.
    pub current: bool,
}

/// Full browser state, parsed from and rendered back to a query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseState {
    pub view: View,
    pub search: String,
    pub sort: SortOrder,
    pub layout: Layout,
}

impl From<BrowseQuery> for BrowseState {
    fn from(query: BrowseQuery) -> Self {
        Self {
            view: View::resolve(query.view.as_deref(), query.category, query.subcategory),
            search: query.q.unwrap_or_default().trim().to_string(),
            sort: SortOrder::parse(query.sort.as_deref()),
            layout: Layout::parse(query.layout.as_deref()),
        }
    }
}

impl BrowseState {
    /// This state with another view; the search text is cleared.
    #[must_use]
    pub fn navigate(&self, view: View) -> Self {
        Self {
            view,
            search: String::new(),
            sort: self.sort,
            layout: self.layout,
        }
    }

    /// URL that restores this exact state.
    #[must_use]
    pub fn href(&self) -> String {
        let mut params: Vec<(&str, &str)> = vec![("view", self.view.name())];
        match &self.view {
            View::Categories => {}
            View::Subcategories { category } => params.push(("category", category.as_str())),
            View::Items {
                category,
                subcategory,
            } => {
                params.push(("category", category.as_str()));
                params.push(("subcategory", subcategory.as_str()));
            }
        }
        if !self.search.is_empty() {
            params.push(("q", self.search.as_str()));
        }
        params.push(("sort", self.sort.as_str()));
        params.push(("layout", self.layout.as_str()));

        let query = params
            .iter()
            .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{BASE_PATH}?{query}")
    }

    /// Link for opening a category from the root view.
    #[must_use]
    pub fn category_href(&self, category: &str) -> String {
        self.navigate(View::Subcategories {
            category: category.to_string(),
        })
        .href()
    }

    /// Link for opening a subcategory.
    #[must_use]
    pub fn subcategory_href(&self, subcategory: &Subcategory) -> String {
        self.navigate(View::Items {
            category: subcategory.parent.clone(),
            subcategory: subcategory.name.clone(),
        })
        .href()
    }

    /// Same view and search with the other sort order.
    #[must_use]
    pub fn sort_toggle_href(&self) -> String {
        Self {
            sort: self.sort.toggled(),
            ..self.clone()
        }
        .href()
    }

    /// Same view and search with the other layout.
    #[must_use]
    pub fn layout_toggle_href(&self) -> String {
        Self {
            layout: self.layout.toggled(),
            ..self.clone()
        }
        .href()
    }

    /// Back link: items return to their category, a category returns to
    /// the root, the root has nowhere to go.
    #[must_use]
    pub fn back_href(&self) -> Option<String> {
        self.view.parent().map(|view| self.navigate(view).href())
    }

    /// Breadcrumb trail from the root down to the current view.
    #[must_use]
    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        let mut trail = vec![(
            "Categories".to_string(),
            self.navigate(View::Categories),
        )];
        match &self.view {
            View::Categories => {}
            View::Subcategories { category } => {
                trail.push((category.clone(), self.navigate(self.view.clone())));
            }
            View::Items {
                category,
                subcategory,
            } => {
                trail.push((
                    category.clone(),
                    self.navigate(View::Subcategories {
                        category: category.clone(),
                    }),
                ));
                trail.push((subcategory.clone(), self.navigate(self.view.clone())));
            }
        }

        let last = trail.len() - 1;
        trail
            .into_iter()
            .enumerate()
            .map(|(i, (name, state))| Breadcrumb {
                name,
                href: state.href(),
                current: i == last,
            })
            .collect()
    }
}

/// What the current view shows, already searched and sorted.
#[derive(Debug, Clone, Default)]
pub struct BrowseContent {
    pub categories: Vec<Category>,
    pub subcategories: Vec<Subcategory>,
    pub items: Vec<Item>,
}

/// Load the records for `state` from the mock layer.
pub async fn load(backend: &MockBackend, state: &BrowseState) -> BrowseContent {
    let needle = Needle::new(&state.search);
    let mut content = match &state.view {
        View::Categories => BrowseContent {
            categories: filter::categories(backend.categories().await, &needle),
            ..BrowseContent::default()
        },
        View::Subcategories { category } => BrowseContent {
            subcategories: filter::subcategories(backend.subcategories_of(category).await, &needle),
            items: filter::items(backend.items_in_category(category).await, &needle),
            ..BrowseContent::default()
        },
        View::Items { subcategory, .. } => BrowseContent {
            items: filter::items(backend.items_in_subcategory(subcategory).await, &needle),
            ..BrowseContent::default()
        },
    };
    filter::sort_by_price(&mut content.items, state.sort);
    content
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::data::Latency;

    use super::*;

    fn state(query: BrowseQuery) -> BrowseState {
        BrowseState::from(query)
    }

    fn items_state() -> BrowseState {
        state(BrowseQuery {
            view: Some("items".to_string()),
            category: Some("Sofa".to_string()),
            subcategory: Some("3-Seater Sofa".to_string()),
            q: Some("velvet".to_string()),
            sort: Some("desc".to_string()),
            layout: Some("list".to_string()),
        })
    }

    /// Follow a link by parsing its query string back into state.
    fn follow(href: &str) -> BrowseState {
        let query = href.split_once('?').map_or("", |(_, q)| q);
        let mut parsed = BrowseQuery::default();
        for pair in query.split('&') {
            let (k, v) = pair.split_once('=').unwrap();
            let v = Some(urlencoding::decode(v).unwrap().into_owned());
            match k {
                "view" => parsed.view = v,
                "category" => parsed.category = v,
                "subcategory" => parsed.subcategory = v,
                "q" => parsed.q = v,
                "sort" => parsed.sort = v,
                "layout" => parsed.layout = v,
                other => panic!("unexpected key {other}"),
            }
        }
        BrowseState::from(parsed)
    }

    #[test]
    fn test_view_resolution() {
        assert_eq!(state(BrowseQuery::default()).view, View::Categories);

        let only_category = state(BrowseQuery {
            category: Some("Chair".to_string()),
            ..BrowseQuery::default()
        });
        assert_eq!(
            only_category.view,
            View::Subcategories {
                category: "Chair".to_string()
            }
        );

        let items_without_category = state(BrowseQuery {
            view: Some("items".to_string()),
            subcategory: Some("Armchair".to_string()),
            ..BrowseQuery::default()
        });
        assert_eq!(items_without_category.view, View::Categories);
    }

    #[test]
    fn test_breadcrumbs_restore_prior_views() {
        let current = items_state();
        let crumbs = current.breadcrumbs();
        let names: Vec<_> = crumbs.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Categories", "Sofa", "3-Seater Sofa"]);
        assert!(crumbs[2].current);
        assert!(!crumbs[0].current);

        let root = follow(&crumbs[0].href);
        assert_eq!(root.view, View::Categories);

        let category = follow(&crumbs[1].href);
        assert_eq!(
            category.view,
            View::Subcategories {
                category: "Sofa".to_string()
            }
        );

        let same = follow(&crumbs[2].href);
        assert_eq!(same.view, current.view);

        for crumb in &crumbs {
            let restored = follow(&crumb.href);
            assert!(restored.search.is_empty());
            assert_eq!(restored.sort, SortOrder::Desc);
            assert_eq!(restored.layout, Layout::List);
        }
    }

    #[test]
    fn test_back_link_walks_up_one_level() {
        let current = items_state();
        let up = follow(&current.back_href().unwrap());
        assert_eq!(
            up.view,
            View::Subcategories {
                category: "Sofa".to_string()
            }
        );
        let root = follow(&up.back_href().unwrap());
        assert_eq!(root.view, View::Categories);
        assert!(root.back_href().is_none());
    }

    #[test]
    fn test_href_round_trips_names_with_spaces() {
        let current = items_state();
        assert_eq!(follow(&current.href()), current);
    }

    #[test]
    fn test_toggles_keep_search() {
        let current = items_state();
        let sorted = follow(&current.sort_toggle_href());
        assert_eq!(sorted.sort, SortOrder::Asc);
        assert_eq!(sorted.search, "velvet");

        let laid_out = follow(&current.layout_toggle_href());
        assert_eq!(laid_out.layout, Layout::Grid);
        assert_eq!(laid_out.search, "velvet");
    }

    #[tokio::test]
    async fn test_load_subcategory_view_includes_items() {
        let backend = MockBackend::new(Latency::NONE);
        let sofa = BrowseState::from(BrowseQuery {
            category: Some("Sofa".to_string()),
            ..BrowseQuery::default()
        });
        let content = load(&backend, &sofa).await;
        assert_eq!(content.subcategories.len(), 3);
        assert_eq!(content.items.len(), 4);
        assert!(content.categories.is_empty());
        assert!(
            content
                .items
                .windows(2)
                .all(|w| w[0].price <= w[1].price)
        );
    }

    #[tokio::test]
    async fn test_load_items_view_searches_and_sorts() {
        let backend = MockBackend::new(Latency::NONE);
        let mut current = items_state();
        current.search = String::new();
        let content = load(&backend, &current).await;
        let names: Vec<_> = content.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["Velvet 3-Seater Sofa", "Premium 3-Seater Sofa"]);

        current.search = "PREMIUM".to_string();
        let content = load(&backend, &current).await;
        assert_eq!(content.items.len(), 1);
    }
}
