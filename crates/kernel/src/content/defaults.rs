//! Bundled default content shipped with the site.

use super::model::{
    Author, BlogPost, Book, Event, Link, Product, Resource, SiteSettings, Snapshot, Testimonial,
};

/// The snapshot used when nothing has been persisted yet, and after a reset.
pub fn bundled_default() -> Snapshot {
    Snapshot {
        settings: SiteSettings {
            site_name: "Willow Rune Press".to_string(),
            tagline: "Stories with Substance and Heart".to_string(),
            seo_description: "An independent publishing studio and author co-op focused on \
                emotionally resonant fiction and community-driven storytelling."
                .to_string(),
            contact_email: "hello@willowrune.press".to_string(),
            social_links: vec![
                Link::new("Instagram", "https://instagram.com"),
                Link::new("Twitter", "https://twitter.com"),
                Link::new("Threads", "https://threads.net"),
            ],
        },
        authors: vec![
            Author {
                id: "a1".to_string(),
                name: "Elara Thorne".to_string(),
                bio: "Elara writes lyrical literary fiction set in the rugged landscapes of the \
                    Pacific Northwest."
                    .to_string(),
                long_bio: "Elara Thorne is an award-winning novelist based in Seattle. Her work \
                    has appeared in numerous literary journals and explores the intersection of \
                    human memory and natural landscapes. When she's not writing, she's foraging \
                    for wild mushrooms or tending to her heirloom garden."
                    .to_string(),
                photo: "https://picsum.photos/seed/elara/600/600".to_string(),
                socials: vec![Link::new("Website", "#")],
                press_info: Some(
                    "Represented by Willow Rune Press. Available for panels and readings."
                        .to_string(),
                ),
            },
            Author {
                id: "a2".to_string(),
                name: "Julian Vane".to_string(),
                bio: "Julian explores the dark corners of the human psyche through speculative \
                    noir."
                    .to_string(),
                long_bio: "Julian Vane's background in investigative journalism informs his \
                    sharp, gritty prose. His debut series 'Neon Shadows' has been praised for its \
                    atmospheric world-building and complex moral dilemmas."
                    .to_string(),
                photo: "https://picsum.photos/seed/julian/600/600".to_string(),
                socials: vec![Link::new("Twitter", "#")],
                press_info: None,
            },
        ],
        books: vec![
            Book {
                id: "b1".to_string(),
                title: "The Silent Forest".to_string(),
                author_id: "a1".to_string(),
                genre: "Literary Fiction".to_string(),
                description: "A haunting tale of reconciliation and the secrets we leave behind \
                    in the woods."
                    .to_string(),
                cover_image: "https://picsum.photos/seed/forest/400/600".to_string(),
                buy_links: vec![
                    Link::new("Barnes & Noble", "#"),
                    Link::new("IndieBound", "#"),
                ],
                excerpt: Some(
                    "The trees didn't speak in words, but in the slow, agonizing creaks of \
                     branches heavy with the weight of decades..."
                        .to_string(),
                ),
                published_date: "2023-11-12".to_string(),
                is_featured: Some(true),
            },
            Book {
                id: "b2".to_string(),
                title: "Glass Horizons".to_string(),
                author_id: "a2".to_string(),
                genre: "Speculative Noir".to_string(),
                description: "In a city where memories can be traded like currency, one \
                    detective finds a gap in his own history."
                    .to_string(),
                cover_image: "https://picsum.photos/seed/glass/400/600".to_string(),
                buy_links: vec![Link::new("Amazon", "#")],
                excerpt: None,
                published_date: "2024-02-15".to_string(),
                is_featured: Some(false),
            },
        ],
        blog_posts: vec![BlogPost {
            id: "p1".to_string(),
            title: "The Art of Slow Publishing".to_string(),
            excerpt: "Why we choose heart over volume in a fast-paced industry.".to_string(),
            content: "At Willow Rune Press, we believe that books need time to breathe. In an \
                era of rapid-fire releases, we're advocating for a return to the deliberate, the \
                thoughtful, and the deeply edited..."
                .to_string(),
            author_id: "a1".to_string(),
            date: "2024-03-20".to_string(),
            image: "https://picsum.photos/seed/blog1/800/400".to_string(),
            tags: vec!["Publishing".to_string(), "Philosophy".to_string()],
        }],
        products: vec![Product {
            id: "m1".to_string(),
            name: "Willow Rune Tote Bag".to_string(),
            price: 25.0,
            description: "Organic cotton canvas tote for your heavy reading list.".to_string(),
            image: "https://picsum.photos/seed/tote/400/400".to_string(),
            category: "Apparel".to_string(),
        }],
        events: vec![Event {
            id: "e1".to_string(),
            title: "Spring Equinox Reading".to_string(),
            date: "2024-04-21".to_string(),
            time: "19:00".to_string(),
            location: "Lighthouse Books, Portland".to_string(),
            description: "Join our authors for an evening of readings and conversation about \
                the changing seasons."
                .to_string(),
            rsvp_link: "#".to_string(),
            image: "https://picsum.photos/seed/event1/800/400".to_string(),
        }],
        resources: vec![Resource {
            id: "r1".to_string(),
            title: "Press Kit Boilerplate".to_string(),
            description: "Official company descriptions and mission statement for media use."
                .to_string(),
            version: "1.2".to_string(),
            file_type: "PDF".to_string(),
            download_url: "#".to_string(),
        }],
        testimonials: vec![Testimonial {
            id: "t1".to_string(),
            quote: "Willow Rune is more than a publisher; it's a sanctuary for stories that \
                matter."
                .to_string(),
            author: "Literary Review Weekly".to_string(),
            role: "Publication".to_string(),
        }],
    }
}
