//! Demo data loaded by the seed operation

use super::track::TrackFields;

fn demo(name: &str, artist: &str, album: &str, genre: &str, duration: i64, year: i64) -> TrackFields {
    TrackFields {
        name: Some(name.to_string()),
        artist: Some(artist.to_string()),
        album: Some(album.to_string()),
        genre: Some(genre.to_string()),
        duration: Some(duration),
        release_year: Some(year),
    }
}

pub fn demo_tracks() -> Vec<TrackFields> {
    vec![
        demo("Raabta", "Arijit Singh", "Agent Vinod", "Romantic", 4, 2012),
        demo("Naina Da Kya Kasoor", "Amit Trivedi", "Andhadhun", "Pop", 3, 2018),
        demo("Ghoomar", "Shreya Ghoshal", "Padmaavat", "Traditional", 3, 2018),
        demo("Bekhayali", "Sachet Tandon", "Kabir Singh", "Rock", 6, 2019),
        demo("Hawa Banke", "Darshan Raval", "Hawa Banke (Single)", "Romantic", 3, 2019),
        demo("Ghungroo", "Arijit Singh", "War", "Dance", 5, 2019),
        demo("Makhna", "Tanishk Bagchi", "Drive", "Hip-Hop", 3, 2019),
        demo("Tera Ban Jaunga", "Tulsi Kumar", "Kabir Singh", "Romantic", 3, 2019),
        demo("First Class", "Arijit Singh", "Kalank", "Dance", 4, 2019),
        demo("Kalank Title Track", "Arijit Singh", "Kalank", "Romantic", 5, 2019),
    ]
}
