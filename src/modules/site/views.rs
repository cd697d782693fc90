//! Page view models rendered from a content snapshot.

use serde::Serialize;
use wrp_kernel::content::{Event, Link, Resource, Snapshot, Testimonial};
use wrp_kernel::PageId;

use crate::modules::forms::{FieldSpec, FormKind};

/// How many authors the home page features.
const HOME_AUTHOR_LIMIT: usize = 4;

/// Genre filter value that shows every book.
pub const ALL_GENRES: &str = "All";

/// Inputs a page render may depend on besides the snapshot.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub genre: Option<String>,
    pub can_edit: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "page", rename_all = "lowercase")]
pub enum PageView {
    Home(HomeView),
    Books(BooksView),
    Authors(AuthorsView),
    About(AboutView),
    Blog(BlogView),
    Shop(ShopView),
    Admin(AdminView),
    Contact(ContactView),
    Submissions(FormView),
    Press(PressView),
    Bookings(BookingsView),
}

impl PageView {
    pub fn page(&self) -> PageId {
        match self {
            PageView::Home(_) => PageId::Home,
            PageView::Books(_) => PageId::Books,
            PageView::Authors(_) => PageId::Authors,
            PageView::About(_) => PageId::About,
            PageView::Blog(_) => PageId::Blog,
            PageView::Shop(_) => PageId::Shop,
            PageView::Admin(_) => PageId::Admin,
            PageView::Contact(_) => PageId::Contact,
            PageView::Submissions(_) => PageId::Submissions,
            PageView::Press(_) => PageId::Press,
            PageView::Bookings(_) => PageId::Bookings,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HomeView {
    pub site_name: String,
    pub tagline: String,
    pub featured: Option<BookCard>,
    pub authors: Vec<AuthorCard>,
    pub testimonials: Vec<Testimonial>,
    pub events: Vec<Event>,
    pub newsletter: FormView,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookCard {
    pub id: String,
    pub title: String,
    pub author_id: String,
    /// Empty when the author reference dangles.
    pub author_name: String,
    pub genre: String,
    pub description: String,
    pub cover_image: String,
    pub buy_links: Vec<Link>,
    pub excerpt: Option<String>,
    pub published_date: String,
    pub featured: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BooksView {
    pub genres: Vec<String>,
    pub selected_genre: String,
    pub books: Vec<BookCard>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthorCard {
    pub id: String,
    pub name: String,
    pub photo: String,
    pub bio: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthorProfile {
    pub id: String,
    pub name: String,
    pub photo: String,
    pub long_bio: String,
    pub socials: Vec<Link>,
    pub press_info: Option<String>,
    pub books: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthorsView {
    pub authors: Vec<AuthorProfile>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AboutView {
    pub site_name: String,
    pub tagline: String,
    pub seo_description: String,
    pub contact_email: String,
    pub social_links: Vec<Link>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostCard {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub author_name: String,
    pub date: String,
    pub image: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BlogView {
    pub posts: Vec<PostCard>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductCard {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub price_label: String,
    pub description: String,
    pub image: String,
    pub category: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShopView {
    pub products: Vec<ProductCard>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormView {
    pub form: FormKind,
    pub fields: &'static [FieldSpec],
}

impl FormView {
    fn of(form: FormKind) -> Self {
        Self {
            form,
            fields: form.fields(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactView {
    pub contact_email: String,
    pub form: FormView,
}

#[derive(Debug, Clone, Serialize)]
pub struct PressView {
    pub resources: Vec<Resource>,
    pub press_contacts: Vec<PressContact>,
    pub form: FormView,
}

#[derive(Debug, Clone, Serialize)]
pub struct PressContact {
    pub author: String,
    pub press_info: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingsView {
    /// Values offered for the booking form's `author` field.
    pub author_options: Vec<String>,
    pub events: Vec<Event>,
    pub form: FormView,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminEntry {
    pub id: String,
    pub title: String,
    pub detail: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminView {
    pub editable: bool,
    pub site_name: String,
    pub tagline: String,
    pub seo_description: String,
    pub books: Vec<AdminEntry>,
    pub authors: Vec<AdminEntry>,
    pub posts: Vec<AdminEntry>,
}

/// Render `page` from `snapshot`.
pub fn render(page: PageId, snapshot: &Snapshot, options: &RenderOptions) -> PageView {
    match page {
        PageId::Home => PageView::Home(home(snapshot)),
        PageId::Books => PageView::Books(books(snapshot, options.genre.as_deref())),
        PageId::Authors => PageView::Authors(authors(snapshot)),
        PageId::About => PageView::About(about(snapshot)),
        PageId::Blog => PageView::Blog(blog(snapshot)),
        PageId::Shop => PageView::Shop(shop(snapshot)),
        PageId::Admin => PageView::Admin(admin(snapshot, options.can_edit)),
        PageId::Contact => PageView::Contact(ContactView {
            contact_email: snapshot.settings.contact_email.clone(),
            form: FormView::of(FormKind::Contact),
        }),
        PageId::Submissions => PageView::Submissions(FormView::of(FormKind::Submissions)),
        PageId::Press => PageView::Press(press(snapshot)),
        PageId::Bookings => PageView::Bookings(BookingsView {
            author_options: snapshot.authors.iter().map(|a| a.name.clone()).collect(),
            events: snapshot.events.clone(),
            form: FormView::of(FormKind::Bookings),
        }),
    }
}

fn book_card(snapshot: &Snapshot, book: &wrp_kernel::content::Book) -> BookCard {
    BookCard {
        id: book.id.clone(),
        title: book.title.clone(),
        author_id: book.author_id.clone(),
        author_name: snapshot.author_name(&book.author_id).to_string(),
        genre: book.genre.clone(),
        description: book.description.clone(),
        cover_image: book.cover_image.clone(),
        buy_links: book.buy_links.clone(),
        excerpt: book.excerpt.clone(),
        published_date: book.published_date.clone(),
        featured: book.featured(),
    }
}

fn home(snapshot: &Snapshot) -> HomeView {
    HomeView {
        site_name: snapshot.settings.site_name.clone(),
        tagline: snapshot.settings.tagline.clone(),
        featured: snapshot
            .featured_book()
            .map(|book| book_card(snapshot, book)),
        authors: snapshot
            .authors
            .iter()
            .take(HOME_AUTHOR_LIMIT)
            .map(|author| AuthorCard {
                id: author.id.clone(),
                name: author.name.clone(),
                photo: author.photo.clone(),
                bio: author.bio.clone(),
            })
            .collect(),
        testimonials: snapshot.testimonials.clone(),
        events: snapshot.events.clone(),
        newsletter: FormView::of(FormKind::Newsletter),
    }
}

fn books(snapshot: &Snapshot, genre: Option<&str>) -> BooksView {
    let mut genres = vec![ALL_GENRES.to_string()];
    for book in &snapshot.books {
        if !genres.contains(&book.genre) {
            genres.push(book.genre.clone());
        }
    }

    let selected = genre
        .filter(|g| genres.iter().any(|known| known == g))
        .unwrap_or(ALL_GENRES)
        .to_string();

    let books = snapshot
        .books
        .iter()
        .filter(|book| selected == ALL_GENRES || book.genre == selected)
        .map(|book| book_card(snapshot, book))
        .collect();

    BooksView {
        genres,
        selected_genre: selected,
        books,
    }
}

fn authors(snapshot: &Snapshot) -> AuthorsView {
    let authors = snapshot
        .authors
        .iter()
        .map(|author| AuthorProfile {
            id: author.id.clone(),
            name: author.name.clone(),
            photo: author.photo.clone(),
            long_bio: author.long_bio.clone(),
            socials: author.socials.clone(),
            press_info: author.press_info.clone(),
            books: snapshot
                .books_by(&author.id)
                .map(|book| book.title.clone())
                .collect(),
        })
        .collect();
    AuthorsView { authors }
}

fn about(snapshot: &Snapshot) -> AboutView {
    let settings = &snapshot.settings;
    AboutView {
        site_name: settings.site_name.clone(),
        tagline: settings.tagline.clone(),
        seo_description: settings.seo_description.clone(),
        contact_email: settings.contact_email.clone(),
        social_links: settings.social_links.clone(),
    }
}

fn blog(snapshot: &Snapshot) -> BlogView {
    let posts = snapshot
        .blog_posts
        .iter()
        .map(|post| PostCard {
            id: post.id.clone(),
            title: post.title.clone(),
            excerpt: post.excerpt.clone(),
            content: post.content.clone(),
            author_name: snapshot.author_name(&post.author_id).to_string(),
            date: post.date.clone(),
            image: post.image.clone(),
            tags: post.tags.clone(),
        })
        .collect();
    BlogView { posts }
}

fn shop(snapshot: &Snapshot) -> ShopView {
    let products = snapshot
        .products
        .iter()
        .map(|product| ProductCard {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            price_label: format!("${:.2}", product.price),
            description: product.description.clone(),
            image: product.image.clone(),
            category: product.category.clone(),
        })
        .collect();
    ShopView { products }
}

fn press(snapshot: &Snapshot) -> PressView {
    PressView {
        resources: snapshot.resources.clone(),
        press_contacts: snapshot
            .authors
            .iter()
            .filter_map(|author| {
                author.press_info.as_ref().map(|info| PressContact {
                    author: author.name.clone(),
                    press_info: info.clone(),
                })
            })
            .collect(),
        form: FormView::of(FormKind::Press),
    }
}

fn admin(snapshot: &Snapshot, editable: bool) -> AdminView {
    AdminView {
        editable,
        site_name: snapshot.settings.site_name.clone(),
        tagline: snapshot.settings.tagline.clone(),
        seo_description: snapshot.settings.seo_description.clone(),
        books: snapshot
            .books
            .iter()
            .map(|book| AdminEntry {
                id: book.id.clone(),
                title: book.title.clone(),
                detail: snapshot.author_name(&book.author_id).to_string(),
            })
            .collect(),
        authors: snapshot
            .authors
            .iter()
            .map(|author| AdminEntry {
                id: author.id.clone(),
                title: author.name.clone(),
                detail: author.bio.clone(),
            })
            .collect(),
        posts: snapshot
            .blog_posts
            .iter()
            .map(|post| AdminEntry {
                id: post.id.clone(),
                title: post.title.clone(),
                detail: post.date.clone(),
            })
            .collect(),
    }
}
