#![allow(dead_code)]

use movieshelf::db::SqliteRepository;

pub struct Fixture {
    pub id: i64,
    pub name: &'static str,
    pub genre: &'static str,
    pub stars: &'static str,
    pub directors: &'static str,
    pub release_date: &'static str,
    pub rating: &'static str,
    pub votes: &'static str,
    pub runtime: &'static str,
    pub budget: Option<&'static str>,
    pub revenue: Option<&'static str>,
}

pub const FIXTURES: &[Fixture] = &[
    Fixture {
        id: 1,
        name: "Steel Horizon",
        genre: "Action,Drama",
        stars: "Ana Lima, Rui Costa",
        directors: "Marta Reis",
        release_date: "01/01/2010",
        rating: "7.5",
        votes: "1000",
        runtime: "118 min",
        budget: Some("0"),
        revenue: Some("500"),
    },
    Fixture {
        id: 2,
        name: "Night Harbor",
        genre: "Action,Thriller",
        stars: "Rui Costa, Ines Melo",
        directors: "Paulo Dias",
        release_date: "12/03/2008",
        rating: "8.1",
        votes: "250000",
        runtime: "131 min",
        budget: Some("50000000"),
        revenue: Some("200000000"),
    },
    Fixture {
        id: 3,
        name: "Quiet Fields",
        genre: "Drama",
        stars: "Ines Melo",
        directors: "Marta Reis",
        release_date: "05/09/1994",
        rating: "8.8",
        votes: "90000",
        runtime: "142 min",
        budget: Some("10000000"),
        revenue: Some("5000000"),
    },
    Fixture {
        id: 4,
        name: "Orbit Run",
        genre: "Sci-Fi,Action",
        stars: "Tom Vale",
        directors: "Paulo Dias",
        release_date: "20/07/2016",
        rating: "6.9",
        votes: "400000",
        runtime: "97 min",
        budget: Some("100000000"),
        revenue: Some("150000000"),
    },
    Fixture {
        id: 5,
        name: "The Last Ledger",
        genre: "Crime,Drama",
        stars: "Tom Vale, Ana Lima",
        directors: "Joana Sa",
        release_date: "02/02/2015",
        rating: "7.2",
        votes: "30000",
        runtime: "104 min",
        budget: Some("2000000"),
        revenue: Some("20000000"),
    },
    Fixture {
        id: 6,
        name: "Paper Moons",
        genre: "Comedy",
        stars: "Ana Lima",
        directors: "Joana Sa",
        release_date: "14/11/2005",
        rating: "6.1",
        votes: "12000",
        runtime: "89 min",
        budget: None,
        revenue: None,
    },
    Fixture {
        id: 7,
        name: "Silent Action Hero",
        genre: "Action",
        stars: "Tom Vale",
        directors: "Marta Reis",
        release_date: "30/06/2004",
        rating: "5.4",
        votes: "8000",
        runtime: "101 min",
        budget: Some("3000000"),
        revenue: Some("1000000"),
    },
];

pub async fn seeded_repo() -> SqliteRepository {
    let repo = SqliteRepository::in_memory().await.unwrap();
    for f in FIXTURES {
        sqlx::query(
            r#"INSERT INTO movies
            ("ID", "Movie Name", "Genre", "Stars", "Directors", "release_date",
             "Rating", "Votes", "Runtime", "budget", "revenue")
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(f.id)
        .bind(f.name)
        .bind(f.genre)
        .bind(f.stars)
        .bind(f.directors)
        .bind(f.release_date)
        .bind(f.rating)
        .bind(f.votes)
        .bind(f.runtime)
        .bind(f.budget)
        .bind(f.revenue)
        .execute(repo.pool())
        .await
        .unwrap();
    }
    repo
}

pub fn year_of(release_date: &Option<String>) -> i64 {
    let date = release_date.as_deref().unwrap_or_default();
    date[date.len() - 4..].parse().unwrap()
}
