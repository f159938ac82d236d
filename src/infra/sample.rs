use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::entities::dataset::{Dataset, Record, RecordId};

pub const SAMPLE_FILE_NAME: &str = "sample-books.csv";
pub const SAMPLE_SIZE: usize = 10_000;
pub const SAMPLE_COLUMNS: [&str; 5] = ["Title", "Author", "Genre", "PublishedYear", "ISBN"];

const GENRES: [&str; 10] = [
    "Fiction",
    "Non-Fiction",
    "Mystery",
    "Romance",
    "Sci-Fi",
    "Fantasy",
    "Biography",
    "History",
    "Science",
    "Technology",
];

const AUTHORS: [&str; 20] = [
    "Jane Smith",
    "John Doe",
    "Emily Johnson",
    "Michael Brown",
    "Sarah Wilson",
    "David Miller",
    "Lisa Garcia",
    "Robert Taylor",
    "Maria Rodriguez",
    "James Anderson",
    "Jennifer Davis",
    "William Martinez",
    "Elizabeth Lopez",
    "Thomas Wilson",
    "Margaret Clark",
    "Christopher Lee",
    "Patricia Young",
    "Daniel Hall",
    "Linda Allen",
    "Mark Wright",
];

const TITLE_PREFIXES: [&str; 10] = [
    "The", "A", "An", "Beyond", "Through", "Into", "Under", "Over", "Behind", "Across",
];

const TITLE_WORDS: [&str; 20] = [
    "Mystery",
    "Adventure",
    "Journey",
    "Quest",
    "Story",
    "Tale",
    "Chronicle",
    "Legend",
    "Secret",
    "Shadow",
    "Light",
    "Dream",
    "Vision",
    "Hope",
    "Truth",
    "Power",
    "Magic",
    "Wonder",
    "Miracle",
    "Discovery",
];

const FIRST_YEAR: u32 = 1950;
const YEAR_END: u32 = 2024;

/// Synthetic book catalogue for exercising the engine without a file.
pub struct SampleGenerator {
    rng: StdRng,
}

impl SampleGenerator {
    /// The same seed always yields the same catalogue; `None` draws from OS
    /// entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    pub fn generate(&mut self, size: usize) -> Dataset {
        let columns = SAMPLE_COLUMNS.iter().map(|c| c.to_string()).collect();
        let records = (1..=size as u64)
            .map(|id| Record::new(RecordId(id), self.book()))
            .collect();
        Dataset::new(columns, records)
    }

    fn book(&mut self) -> BTreeMap<String, String> {
        let title = format!(
            "{} {} of {}",
            self.pick(&TITLE_PREFIXES),
            self.pick(&TITLE_WORDS),
            self.pick(&TITLE_WORDS)
        );
        let author = self.pick(&AUTHORS).to_string();
        let genre = self.pick(&GENRES).to_string();
        let year = self.rng.gen_range(FIRST_YEAR..YEAR_END).to_string();
        let isbn = format!(
            "978-{}{:09}",
            self.rng.gen_range(0..9),
            self.rng.gen_range(0..100_000_000u32)
        );

        SAMPLE_COLUMNS
            .iter()
            .map(|column| column.to_string())
            .zip([title, author, genre, year, isbn])
            .collect()
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.rng.gen_range(0..items.len())]
    }
}
