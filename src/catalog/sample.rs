//! Twelve-book storefront catalog used by the tests

use super::types::{CatalogDocument, CatalogItem, CatalogPage};

pub(crate) const SAMPLE_CATALOG_JSON: &str = r#"[
  {"_id": "1", "title": "The Midnight Library", "author": "Matt Haig",
   "description": "Between life and death there is a library. Between what was and what could be. A woman finds herself in a library where every book allows her to live out an alternate life she could have lived.",
   "price": 12.99, "category": "Fiction", "rating": 4.5, "reviewCount": 3245, "inStock": true, "stockCount": 15,
   "publishedDate": "2020-08-13", "tags": ["Fantasy", "Life", "Library"]},
  {"_id": "2", "title": "Atomic Habits", "author": "James Clear",
   "description": "Transform your life with tiny changes. Atomic Habits reveals how small habits can lead to remarkable results, backed by science and real-world examples.",
   "price": 14.99, "category": "Self-Help", "rating": 4.8, "reviewCount": 5821, "inStock": true, "stockCount": 23,
   "publishedDate": "2018-10-16", "tags": ["Habits", "Self-Improvement", "Productivity"]},
  {"_id": "3", "title": "Dune", "author": "Frank Herbert",
   "description": "A sweeping epic of politics, religion, and ecology set on the desert planet Arrakis. Join Paul Atreides on an epic journey of power and destiny.",
   "price": 15.99, "category": "Science Fiction", "rating": 4.7, "reviewCount": 4567, "inStock": true, "stockCount": 12,
   "publishedDate": "1965-06-01", "tags": ["Science Fiction", "Epic", "Adventure"]},
  {"_id": "4", "title": "The Power of Now", "author": "Eckhart Tolle",
   "description": "Transform your spiritual being and remove pain and suffering from your life. A guide to spiritual enlightenment and living in the present moment.",
   "price": 13.99, "category": "Self-Help", "rating": 4.4, "reviewCount": 3456, "inStock": true, "stockCount": 18,
   "publishedDate": "1997-09-01", "tags": ["Spirituality", "Mindfulness", "Philosophy"]},
  {"_id": "5", "title": "Project Hail Mary", "author": "Andy Weir",
   "description": "A lone astronaut must save Earth from extinction. A gripping science fiction adventure about survival, courage, and human ingenuity.",
   "price": 16.99, "category": "Science Fiction", "rating": 4.6, "reviewCount": 4234, "inStock": true, "stockCount": 8,
   "publishedDate": "2021-05-04", "tags": ["Science Fiction", "Adventure", "Space"]},
  {"_id": "6", "title": "The Silent Patient", "author": "Alex Michaelides",
   "description": "A woman shoots her husband five times and then never speaks again. A psychotherapist becomes obsessed with uncovering why she committed the perfect crime.",
   "price": 14.99, "category": "Mystery", "rating": 4.5, "reviewCount": 5023, "inStock": true, "stockCount": 20,
   "publishedDate": "2019-02-05", "tags": ["Mystery", "Thriller", "Psychological"]},
  {"_id": "7", "title": "Educated", "author": "Tara Westover",
   "description": "A memoir about a young woman who leaves her survivalist family to pursue education. A powerful story of transformation and self-discovery.",
   "price": 17.99, "category": "Biography", "rating": 4.6, "reviewCount": 6789, "inStock": true, "stockCount": 11,
   "publishedDate": "2018-02-20", "tags": ["Biography", "Memoir", "Education"]},
  {"_id": "8", "title": "The Great Gatsby", "author": "F. Scott Fitzgerald",
   "description": "The definitive American novel. Enter the lavish world of 1920s New York and witness the tragic pursuit of an impossible dream.",
   "price": 9.99, "category": "Fiction", "rating": 4.3, "reviewCount": 7234, "inStock": true, "stockCount": 25,
   "publishedDate": "1925-04-10", "tags": ["Classic", "Romance", "American Literature"]},
  {"_id": "9", "title": "Sapiens", "author": "Yuval Noah Harari",
   "description": "A sweeping history of humankind from the Stone Age to modern times. Explore how humans came to dominate the world.",
   "price": 18.99, "category": "Non-Fiction", "rating": 4.7, "reviewCount": 8456, "inStock": true, "stockCount": 14,
   "publishedDate": "2014-09-04", "tags": ["History", "Anthropology", "Science"]},
  {"_id": "10", "title": "The Hobbit", "author": "J.R.R. Tolkien",
   "description": "An unexpected adventure begins when a reluctant hobbit embarks on a quest to reclaim treasure guarded by a dragon.",
   "price": 13.99, "category": "Fantasy", "rating": 4.8, "reviewCount": 6123, "inStock": true, "stockCount": 19,
   "publishedDate": "1937-09-21", "tags": ["Fantasy", "Adventure", "Classics"]},
  {"_id": "11", "title": "Thinking, Fast and Slow", "author": "Daniel Kahneman",
   "description": "Explore the two systems of thought that control the way we think. Understand how we make decisions and why we often get them wrong.",
   "price": 16.99, "category": "Non-Fiction", "rating": 4.5, "reviewCount": 5234, "inStock": true, "stockCount": 9,
   "publishedDate": "2011-10-25", "tags": ["Psychology", "Cognition", "Decision-Making"]},
  {"_id": "12", "title": "1984", "author": "George Orwell",
   "description": "A dystopian masterpiece set in a totalitarian regime. A gripping exploration of power, control, and the nature of truth.",
   "price": 11.99, "category": "Fiction", "rating": 4.6, "reviewCount": 7892, "inStock": false, "stockCount": 0,
   "publishedDate": "1949-06-08", "tags": ["Dystopian", "Classic", "Science Fiction"]}
]"#;

pub(crate) fn sample_catalog() -> Vec<CatalogItem> {
    let doc: CatalogDocument =
        serde_json::from_str(SAMPLE_CATALOG_JSON).expect("sample catalog is valid JSON");
    CatalogPage::from(doc).items
}

#[test]
fn test_sample_catalog_loads() {
    let items = sample_catalog();
    assert_eq!(items.len(), 12);
    assert!(items.iter().all(|i| !i.title.is_empty() && i.published_date.is_some()));
}
