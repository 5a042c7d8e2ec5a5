//! CLI tool for data inspection and booking reports.
//!
//! Provides commands for:
//! - Listing users and bookings from the data files
//! - Printing the most-booked / most-revenue reports

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use booking_core::model::Role;
use booking_core::{reports, BookingEngine, FileStore, RecordResolver, StoreConfig};

/// Command-line arguments for the booking tool.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Data directory holding the users, bookings, and snapshot files
    #[arg(long, default_value = "./data")]
    data_dir: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all users
    Users,
    /// List the movie catalog
    Movies,
    /// List the show catalog
    Shows,
    /// List all bookings
    Bookings,
    /// Print the most-booked and most-revenue reports
    Reports,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let config = StoreConfig::with_data_dir(PathBuf::from(&args.data_dir));
    let store = FileStore::new(&config);
    tracing::debug!("Using data directory {}", config.data_dir.display());

    match args.command {
        Command::Users => list_users(&store),
        Command::Movies => list_movies(&store),
        Command::Shows => list_shows(&store),
        Command::Bookings => list_bookings(&store),
        Command::Reports => print_reports(&store),
    }
}

fn list_movies(store: &FileStore) -> anyhow::Result<()> {
    let catalog = store.load_movie_catalog().context("loading movie catalog")?;
    for movie in catalog.movies() {
        println!(
            "#{:<4} {:<30} {:<20} {} {} price {}",
            movie.sequence_id,
            movie.name,
            movie.genre_display(),
            movie.published,
            movie.duration_display(),
            movie.ticket_price
        );
    }
    println!("{} movies", catalog.len());
    Ok(())
}

fn list_shows(store: &FileStore) -> anyhow::Result<()> {
    let catalog = store.load_show_catalog().context("loading show catalog")?;
    for show in catalog.shows() {
        println!(
            "#{:<4} {:<30} {:<20} {} price {}",
            show.sequence_id,
            show.title,
            show.genre,
            show.schedule_display(),
            show.ticket_price
        );
    }
    println!("{} shows", catalog.len());
    Ok(())
}

fn list_users(store: &FileStore) -> anyhow::Result<()> {
    let users = store.read_users().context("loading users")?;
    for user in &users {
        match user.role() {
            Role::Admin => println!("#{:<4} {:<12} {}", user.id, "Admin", user.display_name()),
            Role::Guest {
                money_spent,
                movies_booked,
            } => println!(
                "#{:<4} {:<12} {} (spent {}, {} bookings)",
                user.id,
                "Guest",
                user.display_name(),
                money_spent,
                movies_booked
            ),
            Role::Receptionist {
                window_number,
                revenue_made,
                movies_booked,
            } => println!(
                "#{:<4} {:<12} {} (window {}, revenue {}, {} bookings)",
                user.id,
                "Receptionist",
                user.display_name(),
                window_number,
                revenue_made,
                movies_booked
            ),
        }
    }
    println!("{} users", users.len());
    Ok(())
}

fn list_bookings(store: &FileStore) -> anyhow::Result<()> {
    let users = store.read_users().context("loading users")?;
    let movies = store.load_movie_catalog().context("loading movie catalog")?;
    let shows = store.load_show_catalog().context("loading show catalog")?;
    let halls = store.load_hall_registry().context("loading hall registry")?;

    let resolver = RecordResolver {
        users: &users,
        movies: movies.movies(),
        shows: shows.shows(),
        halls: &halls,
    };
    let bookings = store.read_bookings(&resolver).context("loading bookings")?;
    for booking in &bookings {
        let what = match (booking.movie_id, booking.show_id) {
            (Some(movie_id), _) => resolver
                .movie(movie_id)
                .map(|m| m.name.clone())
                .unwrap_or_default(),
            (None, Some(show_id)) => resolver
                .show(show_id)
                .map(|s| format!("{} ({})", s.title, s.schedule_display()))
                .unwrap_or_default(),
            (None, None) => String::new(),
        };
        println!(
            "#{:<4} {} hall {} seat {} {}",
            booking.booking_number,
            booking.date_display(),
            booking.hall_id,
            booking.seat_number,
            what
        );
    }
    println!("{} bookings", bookings.len());
    Ok(())
}

fn print_reports(store: &FileStore) -> anyhow::Result<()> {
    let users = store.read_users().context("loading users")?;
    let movies = store.load_movie_catalog().context("loading movie catalog")?;
    let shows = store.load_show_catalog().context("loading show catalog")?;
    let halls = store.load_hall_registry().context("loading hall registry")?;

    let resolver = RecordResolver {
        users: &users,
        movies: movies.movies(),
        shows: shows.shows(),
        halls: &halls,
    };
    let bookings = store.read_bookings(&resolver).context("loading bookings")?;

    let mut engine = BookingEngine::new(store.clone());
    engine.rebuild_counters(&bookings);

    let named = |id: Option<u32>, name: Option<String>| match (id, name) {
        (Some(id), Some(name)) => format!("#{} {}", id, name),
        (Some(id), None) => format!("#{}", id),
        _ => "none".to_string(),
    };

    let most_booked_movie = engine.most_booked_movie_id();
    println!(
        "Most booked movie:        {}",
        named(
            most_booked_movie,
            most_booked_movie.and_then(|id| movies.find(id)).map(|m| m.name.clone())
        )
    );
    let most_booked_show = engine.most_booked_show_id();
    println!(
        "Most booked show:         {}",
        named(
            most_booked_show,
            most_booked_show.and_then(|id| shows.find(id)).map(|s| s.title.clone())
        )
    );

    let top_count = most_booked_movie.map(|id| engine.movie_count(id)).unwrap_or(0);
    let top_revenue_movie = reports::most_revenue_movie(movies.movies(), top_count);
    println!(
        "Most revenue movie:       {}",
        named(
            top_revenue_movie,
            top_revenue_movie.and_then(|id| movies.find(id)).map(|m| m.name.clone())
        )
    );

    let top_show_count = most_booked_show.map(|id| engine.show_count(id)).unwrap_or(0);
    let top_revenue_show = reports::most_revenue_show(shows.shows(), top_show_count);
    println!(
        "Most revenue show:        {}",
        named(
            top_revenue_show,
            top_revenue_show.and_then(|id| shows.find(id)).map(|s| s.title.clone())
        )
    );

    let by_user = |id: Option<u32>| {
        named(
            id,
            id.and_then(|id| users.iter().find(|u| u.id == id))
                .map(|u| u.display_name()),
        )
    };
    println!(
        "Top receptionist (count): {}",
        by_user(reports::max_receptionist_by_bookings(
            &reports::receptionist_booking_counts(&users)
        ))
    );
    println!(
        "Top receptionist (made):  {}",
        by_user(reports::max_receptionist_by_revenue(
            &reports::receptionist_revenue(&users)
        ))
    );
    println!(
        "Top guest (count):        {}",
        by_user(reports::max_guest_by_bookings(&reports::guest_booking_counts(
            &users
        )))
    );
    println!(
        "Top guest (spent):        {}",
        by_user(reports::max_guest_by_revenue(&reports::guest_spending(&users)))
    );
    Ok(())
}
