use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// A (platform, url) pair used for social profiles and purchase links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub platform: String,
    pub url: String,
}

impl Link {
    pub fn new(platform: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            url: url.into(),
        }
    }
}

/// Site-wide settings edited from the admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    pub site_name: String,
    pub tagline: String,
    pub seo_description: String,
    #[serde(default)]
    pub contact_email: String,
    #[serde(default)]
    pub social_links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: String,
    pub name: String,
    pub bio: String,
    pub long_bio: String,
    pub photo: String,
    #[serde(default)]
    pub socials: Vec<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub press_info: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub title: String,
    /// Foreign key into [`Snapshot::authors`]; may dangle.
    pub author_id: String,
    pub genre: String,
    pub description: String,
    pub cover_image: String,
    #[serde(default)]
    pub buy_links: Vec<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    pub published_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
}

impl Book {
    pub fn featured(&self) -> bool {
        self.is_featured.unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub author_id: String,
    pub date: String,
    pub image: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub description: String,
    pub image: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub description: String,
    pub rsvp_link: String,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: String,
    pub title: String,
    pub description: String,
    pub version: String,
    pub file_type: String,
    pub download_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: String,
    pub quote: String,
    pub author: String,
    pub role: String,
}

/// The single aggregate record of all editable site content.
///
/// Snapshots are replaced wholesale on every edit; nothing patches the
/// persisted form field by field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub settings: SiteSettings,
    #[serde(default)]
    pub authors: Vec<Author>,
    #[serde(default)]
    pub books: Vec<Book>,
    #[serde(default)]
    pub blog_posts: Vec<BlogPost>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub testimonials: Vec<Testimonial>,
}

/// A problem found by [`Snapshot::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub collection: &'static str,
    pub id: String,
    pub problem: String,
}

impl Snapshot {
    pub fn author(&self, id: &str) -> Option<&Author> {
        self.authors.iter().find(|author| author.id == id)
    }

    /// Display name for an author reference. A dangling reference yields an
    /// empty placeholder rather than an error.
    pub fn author_name(&self, id: &str) -> &str {
        self.author(id).map(|author| author.name.as_str()).unwrap_or("")
    }

    /// First book flagged as featured, falling back to the first book.
    pub fn featured_book(&self) -> Option<&Book> {
        self.books
            .iter()
            .find(|book| book.featured())
            .or_else(|| self.books.first())
    }

    pub fn books_by<'a>(&'a self, author_id: &'a str) -> impl Iterator<Item = &'a Book> + 'a {
        self.books
            .iter()
            .filter(move |book| book.author_id == author_id)
    }

    /// Check id uniqueness per collection and product prices.
    ///
    /// Dangling author references are deliberately not reported.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        duplicate_ids(
            "authors",
            self.authors.iter().map(|a| a.id.as_str()),
            &mut issues,
        );
        duplicate_ids("books", self.books.iter().map(|b| b.id.as_str()), &mut issues);
        duplicate_ids(
            "blogPosts",
            self.blog_posts.iter().map(|p| p.id.as_str()),
            &mut issues,
        );
        duplicate_ids(
            "products",
            self.products.iter().map(|p| p.id.as_str()),
            &mut issues,
        );
        duplicate_ids("events", self.events.iter().map(|e| e.id.as_str()), &mut issues);
        duplicate_ids(
            "resources",
            self.resources.iter().map(|r| r.id.as_str()),
            &mut issues,
        );
        duplicate_ids(
            "testimonials",
            self.testimonials.iter().map(|t| t.id.as_str()),
            &mut issues,
        );

        for product in &self.products {
            if !product.price.is_finite() || product.price < 0.0 {
                issues.push(ValidationIssue {
                    collection: "products",
                    id: product.id.clone(),
                    problem: format!("price must be a non-negative amount, got {}", product.price),
                });
            }
        }

        issues
    }
}

fn duplicate_ids<'a>(
    collection: &'static str,
    ids: impl Iterator<Item = &'a str>,
    issues: &mut Vec<ValidationIssue>,
) {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for id in ids {
        if !seen.insert(id) && reported.insert(id) {
            issues.push(ValidationIssue {
                collection,
                id: id.to_string(),
                problem: "duplicate id".to_string(),
            });
        }
    }
}
