//! Static content of the site: the Sept 2011 - Jan 2012 timeline, meme images and
//! the background playlist.

use chrono::NaiveDate;

use crate::{ItemKind, MemeSource, Mood, TimelineItem, Track, TrackCategory};

struct ItemSeed {
    id: u32,
    date: (i32, u32, u32),
    act: u8,
    title: &'static str,
    text: &'static str,
    kind: ItemKind,
    location: &'static str,
    mood: Mood,
    source: &'static str,
}

const TIMELINE_SEEDS: [ItemSeed; 22] = [
    // Act 1: September, the spark
    ItemSeed {
        id: 1,
        date: (2011, 9, 17),
        act: 1,
        title: "OCCUPY WALL STREET BEGINS",
        text: "Protesters occupy Zuccotti Park in NYC",
        kind: ItemKind::Headline,
        location: "NYC",
        mood: Mood::Hope,
        source: "Various news outlets",
    },
    ItemSeed {
        id: 2,
        date: (2011, 9, 23),
        act: 1,
        title: "BITCOIN 0.4.0 RELEASED",
        text: "First version with wallet encryption",
        kind: ItemKind::Headline,
        location: "Internet",
        mood: Mood::Tech,
        source: "bitcoin.org",
    },
    ItemSeed {
        id: 3,
        date: (2011, 9, 24),
        act: 1,
        title: "\"We are the 99%\"",
        text: "Tumblr launches, slogan spreads virally",
        kind: ItemKind::Quote,
        location: "Internet",
        mood: Mood::Hope,
        source: "wearethe99percent.tumblr.com",
    },
    // Act 2: October, the surge
    ItemSeed {
        id: 4,
        date: (2011, 10, 6),
        act: 2,
        title: "OCCUPY PORTLAND BEGINS",
        text: "4,000+ march through downtown - one of largest rallies in nation",
        kind: ItemKind::Headline,
        location: "Portland",
        mood: Mood::Energy,
        source: "The Oregonian",
    },
    ItemSeed {
        id: 5,
        date: (2011, 10, 6),
        act: 2,
        title: "\"This is what democracy looks like\"",
        text: "Chant echoes through Pioneer Courthouse Square",
        kind: ItemKind::Quote,
        location: "Portland",
        mood: Mood::Energy,
        source: "Occupy Portland",
    },
    ItemSeed {
        id: 6,
        date: (2011, 10, 6),
        act: 2,
        title: "\"Whose square? Our square!\"",
        text: "Protesters fill Pioneer Courthouse Square",
        kind: ItemKind::Quote,
        location: "Portland",
        mood: Mood::Energy,
        source: "The Oregonian",
    },
    ItemSeed {
        id: 7,
        date: (2011, 10, 6),
        act: 2,
        title: "Umbrella Man gets a sign",
        text: "Portland icon holds \"We are the 99%\" sign",
        kind: ItemKind::Headline,
        location: "Portland",
        mood: Mood::Energy,
        source: "The Oregonian",
    },
    ItemSeed {
        id: 8,
        date: (2011, 10, 9),
        act: 2,
        title: "OCCUPY SPREADS TO 70+ CITIES",
        text: "Movement goes nationwide",
        kind: ItemKind::Headline,
        location: "USA",
        mood: Mood::Momentum,
        source: "Various",
    },
    ItemSeed {
        id: 9,
        date: (2011, 10, 15),
        act: 2,
        title: "GLOBAL DAY OF ACTION",
        text: "Protests in 900+ cities worldwide",
        kind: ItemKind::Headline,
        location: "Global",
        mood: Mood::Momentum,
        source: "Various",
    },
    // Act 3: November, the crackdown
    ItemSeed {
        id: 10,
        date: (2011, 11, 13),
        act: 3,
        title: "POLICE EVICT OCCUPY PORTLAND",
        text: "Riot police clear Lownsdale and Chapman Square parks",
        kind: ItemKind::Headline,
        location: "Portland",
        mood: Mood::Confrontation,
        source: "BBC News",
    },
    ItemSeed {
        id: 11,
        date: (2011, 11, 13),
        act: 3,
        title: "\"I don't see no riot here, take off your riot gear\"",
        text: "Protesters chant as police move in",
        kind: ItemKind::Quote,
        location: "Portland",
        mood: Mood::Confrontation,
        source: "BBC News",
    },
    ItemSeed {
        id: 12,
        date: (2011, 11, 13),
        act: 3,
        title: "\"The parks are gone, but the consciousness has not died\"",
        text: "Gina Ronning, Occupy Portland organizer",
        kind: ItemKind::Quote,
        location: "Portland",
        mood: Mood::Persistence,
        source: "The Oregonian",
    },
    ItemSeed {
        id: 13,
        date: (2011, 11, 15),
        act: 3,
        title: "NYPD RAIDS ZUCCOTTI PARK",
        text: "Original Occupy camp cleared",
        kind: ItemKind::Headline,
        location: "NYC",
        mood: Mood::Confrontation,
        source: "Various",
    },
    ItemSeed {
        id: 14,
        date: (2011, 11, 17),
        act: 3,
        title: "NATIONAL DAY OF ACTION",
        text: "400 arrested nationwide, 300 in NYC",
        kind: ItemKind::Headline,
        location: "USA",
        mood: Mood::Confrontation,
        source: "CBS News",
    },
    ItemSeed {
        id: 15,
        date: (2011, 11, 21),
        act: 3,
        title: "BITCOIN 0.5.0 RELEASED",
        text: "Improved wallet encryption",
        kind: ItemKind::Headline,
        location: "Internet",
        mood: Mood::Tech,
        source: "bitcoin.org",
    },
    // Act 4: December, the ports and winter break
    ItemSeed {
        id: 16,
        date: (2011, 12, 12),
        act: 4,
        title: "OCCUPY THE PORTS",
        text: "Portland protesters shut down Terminal 5 and 6",
        kind: ItemKind::Headline,
        location: "Portland",
        mood: Mood::Persistence,
        source: "NPR",
    },
    ItemSeed {
        id: 17,
        date: (2011, 12, 12),
        act: 4,
        title: "\"Shut Down Wall Street on the Waterfront\"",
        text: "West Coast port blockade coordinated action",
        kind: ItemKind::Quote,
        location: "Portland",
        mood: Mood::Persistence,
        source: "Labor Notes",
    },
    ItemSeed {
        id: 18,
        date: (2011, 12, 12),
        act: 4,
        title: "Protesters gather at Kelley Point Park",
        text: "March to Marine Drive terminals",
        kind: ItemKind::Headline,
        location: "Portland",
        mood: Mood::Persistence,
        source: "KING5",
    },
    ItemSeed {
        id: 19,
        date: (2011, 12, 17),
        act: 4,
        title: "KIM JONG-IL DEAD AT 69",
        text: "North Korean leader dies, world reacts",
        kind: ItemKind::Headline,
        location: "World",
        mood: Mood::World,
        source: "BBC News",
    },
    ItemSeed {
        id: 20,
        date: (2011, 12, 20),
        act: 4,
        title: "CMU WINTER BREAK BEGINS",
        text: "Students head home for the holidays",
        kind: ItemKind::Headline,
        location: "Pittsburgh/Portland",
        mood: Mood::Personal,
        source: "CMU Academic Calendar",
    },
    ItemSeed {
        id: 21,
        date: (2011, 12, 25),
        act: 4,
        title: "Christmas 2011",
        text: "Family time, brother home from CMU...",
        kind: ItemKind::Headline,
        location: "Portland",
        mood: Mood::Personal,
        source: "",
    },
    ItemSeed {
        id: 22,
        date: (2012, 1, 1),
        act: 4,
        title: "New Year 2012",
        text: "Bitcoin wallet needs a password...",
        kind: ItemKind::Headline,
        location: "Portland",
        mood: Mood::Personal,
        source: "",
    },
];

const MEME_SEEDS: [(&str, &str, u32, bool); 48] = [
    ("https://media.giphy.com/media/sIIhZliB2McAo/giphy.gif", "Nyan Cat", 120, true),
    ("https://media.giphy.com/media/3o85xoi6nNqJQJ95Qc/giphy.gif", "Nyan Cat Rainbow", 100, true),
    ("https://media.giphy.com/media/l0MYyv6UK0Bd4DE76/giphy.gif", "Dancing", 80, true),
    ("https://media.giphy.com/media/o0vwzuFwCGAFO/giphy.gif", "Keyboard Cat", 100, true),
    ("https://media.giphy.com/media/ENagATV1Gr9eg/giphy.gif", "Deal With It", 80, true),
    ("https://media.giphy.com/media/kKdgdeuO2M08M/giphy.gif", "Dramatic Look", 90, true),
    ("https://media.giphy.com/media/Ju7l5y9osyymQ/giphy.gif", "Rick Roll", 100, true),
    ("https://media.giphy.com/media/amxLHEPgGDCKs/giphy.gif", "Trollface Animated", 80, true),
    ("https://media.giphy.com/media/l4FGpPki5v2Bcd6Ss/giphy.gif", "Rainbow Spin", 70, true),
    ("https://media.giphy.com/media/YQitE4YNQNahy/giphy.gif", "Hacking", 100, true),
    ("https://media.giphy.com/media/sULKEgDMX8LcI/giphy.gif", "Matrix", 90, true),
    ("https://i.kym-cdn.com/entries/icons/original/000/000/091/TrollFace.jpg", "Trollface", 80, false),
    ("https://i.kym-cdn.com/entries/icons/original/000/003/619/ForeverAlone.jpg", "Forever Alone", 70, false),
    ("https://i.kym-cdn.com/entries/icons/original/000/004/006/y-u-no-guy.jpg", "Y U NO", 80, false),
    ("https://i.kym-cdn.com/entries/icons/original/000/002/252/NoMeGusta.jpg", "Me Gusta", 70, false),
    ("https://i.kym-cdn.com/entries/icons/original/000/000/063/Rage.jpg", "FFFUUU", 70, false),
    ("https://i.kym-cdn.com/entries/icons/original/000/003/617/OkayGuy.jpg", "Okay", 70, false),
    ("https://i.kym-cdn.com/entries/icons/original/000/004/457/challenge.jpg", "Challenge Accepted", 70, false),
    ("https://i.kym-cdn.com/entries/icons/original/000/002/686/cereal_guy.jpg", "Cereal Guy", 70, false),
    ("https://i.kym-cdn.com/entries/icons/original/000/003/193/1279052383758.jpg", "Poker Face", 70, false),
    ("https://i.kym-cdn.com/entries/icons/original/000/000/281/lolface.jpg", "LOL Face", 70, false),
    ("https://i.kym-cdn.com/entries/icons/original/000/006/423/ragecomic.png", "Derp", 70, false),
    ("https://i.kym-cdn.com/entries/icons/original/000/006/151/ObamaNotBad.jpg", "Not Bad", 80, false),
    ("https://i.imgflip.com/1bgw.jpg", "Not Sure If", 90, false),
    ("https://i.kym-cdn.com/entries/icons/original/000/000/745/success.jpg", "Success Kid", 80, false),
    ("https://i.kym-cdn.com/entries/icons/original/000/006/707/nothing-to-do-here-template.jpg", "Nothing To Do Here", 80, false),
    ("https://i.kym-cdn.com/entries/icons/original/000/000/046/Philosoraptor.jpg", "Philosoraptor", 80, false),
    ("https://i.kym-cdn.com/entries/icons/original/000/006/026/NOTSUREIF.jpg", "Scumbag", 80, false),
    ("https://i.kym-cdn.com/entries/icons/original/000/007/508/neildegrasse.jpg", "Good Guy", 80, false),
    ("https://i.kym-cdn.com/entries/icons/original/000/005/848/Aliens.jpg", "Aliens", 80, false),
    ("https://i.kym-cdn.com/entries/icons/original/000/007/784/14-one-does-not-simply.jpg", "One Does Not Simply", 90, false),
    ("https://i.kym-cdn.com/entries/icons/original/000/013/564/doge.jpg", "Doge", 90, false),
    ("https://i.kym-cdn.com/entries/icons/original/000/006/199/x-all-the-y.png", "All The Things", 80, false),
    ("https://i.kym-cdn.com/entries/icons/original/000/005/574/takemymoney.jpg", "Take My Money", 80, false),
    ("https://upload.wikimedia.org/wikipedia/commons/thumb/4/46/Bitcoin.svg/200px-Bitcoin.svg.png", "Bitcoin", 60, false),
    ("https://upload.wikimedia.org/wikipedia/commons/thumb/a/a6/Anonymous_emblem.svg/200px-Anonymous_emblem.svg.png", "Anonymous", 70, false),
    ("https://i.kym-cdn.com/entries/icons/original/000/021/807/ig9OoyenpxqdCQyABmOQBZDI0duHk2QZZmWg2Hxd4ro.jpg", "Hackerman", 90, false),
    ("https://upload.wikimedia.org/wikipedia/commons/thumb/a/ab/Patates.jpg/220px-Patates.jpg", "Potato", 60, false),
    ("https://upload.wikimedia.org/wikipedia/commons/thumb/8/8c/Twemoji_1f4a9.svg/200px-Twemoji_1f4a9.svg.png", "Poop", 50, false),
    ("https://i.kym-cdn.com/entries/icons/original/000/000/774/lime-cat.jpg", "Lime Cat", 80, false),
    ("https://i.kym-cdn.com/entries/icons/original/000/000/016/ceilingcat.jpg", "Ceiling Cat", 80, false),
    ("https://i.kym-cdn.com/entries/icons/original/000/000/076/longcat.jpg", "Longcat", 100, false),
    ("https://i.kym-cdn.com/entries/icons/original/000/000/026/lolcat.jpg", "LOLcat", 80, false),
    ("https://i.kym-cdn.com/entries/icons/original/000/000/005/pedobear.jpg", "Pedobear", 70, false),
    ("https://i.kym-cdn.com/entries/icons/original/000/018/012/this_is_fine.jpeg", "This Is Fine", 90, false),
    ("https://i.kym-cdn.com/entries/icons/original/000/009/479/Ermahgerd.jpg", "Ermahgerd", 80, false),
    ("https://i.kym-cdn.com/entries/icons/original/000/010/496/Overly_attached_GF.jpg", "Overly Attached", 80, false),
    ("https://i.kym-cdn.com/entries/icons/original/000/014/285/sidecat.jpg", "Grumpy Cat", 80, false),
];

struct TrackSeed {
    title: &'static str,
    youtube_id: Option<&'static str>,
    midi_url: Option<&'static str>,
    category: TrackCategory,
    note: Option<&'static str>,
}

const TRACK_SEEDS: [TrackSeed; 11] = [
    TrackSeed {
        title: "Party Rock Anthem - LMFAO",
        youtube_id: Some("KQ6zr6kCPj8"),
        midi_url: Some("https://bitmidi.com/uploads/69296.mid"),
        category: TrackCategory::Pop,
        note: None,
    },
    TrackSeed {
        title: "Rolling in the Deep - Adele",
        youtube_id: Some("rYEDA3JcQqw"),
        midi_url: None,
        category: TrackCategory::Pop,
        note: None,
    },
    TrackSeed {
        title: "Moves Like Jagger - Maroon 5",
        youtube_id: Some("iEPTlhBmwRg"),
        midi_url: None,
        category: TrackCategory::Pop,
        note: None,
    },
    TrackSeed {
        title: "Nyan Cat",
        youtube_id: Some("wZZ7oFKsKzY"),
        midi_url: None,
        category: TrackCategory::Meme,
        note: None,
    },
    TrackSeed {
        title: "Angry Birds Theme - Ari Pulkkinen",
        youtube_id: Some("6DYJXSSgW08"),
        midi_url: None,
        category: TrackCategory::Game,
        note: Some("Iconic 2011 mobile game theme"),
    },
    TrackSeed {
        title: "Sandstorm - Darude",
        youtube_id: Some("y6120QOlsfU"),
        midi_url: Some("https://freemidi.org/download3-7791-sandstorm-darude"),
        category: TrackCategory::Hacker,
        note: Some("1999 release but huge meme in early 2010s - \"song name?\" trolling"),
    },
    TrackSeed {
        title: "Hacker Music - ytcracker",
        youtube_id: Some("NL0yFE0v6VI"),
        midi_url: None,
        category: TrackCategory::Nerdcore,
        note: Some("DEF CON 19 performer, nerdcore pioneer"),
    },
    TrackSeed {
        title: "The Link - ytcracker",
        youtube_id: Some("L41cCGnnjiw"),
        midi_url: None,
        category: TrackCategory::Nerdcore,
        note: Some("Classic nerdcore track"),
    },
    TrackSeed {
        title: "Dual Core - All The Things",
        youtube_id: None,
        midi_url: None,
        category: TrackCategory::Nerdcore,
        note: Some("Nerdcore duo - \"My Girlfriend's a Hacker\""),
    },
    TrackSeed {
        title: "MC Frontalot",
        youtube_id: None,
        midi_url: None,
        category: TrackCategory::Nerdcore,
        note: Some("Godfather of nerdcore hip-hop"),
    },
    TrackSeed {
        title: "Chiptune/8-bit music",
        youtube_id: None,
        midi_url: None,
        category: TrackCategory::Chiptune,
        note: Some("Game Boy, NES era sounds - popular at hacker cons"),
    },
];

fn non_empty(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// The timeline in narrative order.
pub fn timeline_2011() -> Vec<TimelineItem> {
    TIMELINE_SEEDS
        .iter()
        .map(|seed| {
            let (year, month, day) = seed.date;
            TimelineItem {
                id: seed.id,
                date: NaiveDate::from_ymd_opt(year, month, day),
                title: seed.title.to_string(),
                text: non_empty(seed.text),
                kind: seed.kind,
                mood: Some(seed.mood),
                source: non_empty(seed.source),
                location: non_empty(seed.location),
                act: Some(seed.act),
            }
        })
        .collect()
}

pub fn meme_sources() -> Vec<MemeSource> {
    MEME_SEEDS
        .iter()
        .map(|&(url, name, size, is_gif)| MemeSource {
            url: url.to_string(),
            name: name.to_string(),
            size,
            is_gif,
        })
        .collect()
}

pub fn music_2011() -> Vec<Track> {
    TRACK_SEEDS
        .iter()
        .map(|seed| Track {
            title: seed.title.to_string(),
            audio_url: None,
            youtube_id: seed.youtube_id.map(str::to_string),
            midi_url: seed.midi_url.map(str::to_string),
            category: seed.category,
            note: seed.note.map(str::to_string),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeline_is_ordered_and_dated() {
        let items = timeline_2011();
        assert_eq!(items.len(), 22);
        assert!(items.iter().all(|item| item.date.is_some()));
        assert!(items.windows(2).all(|pair| pair[0].date <= pair[1].date));
        assert!(items.windows(2).all(|pair| pair[0].id < pair[1].id));
        assert_eq!(items[0].date_label().as_deref(), Some("Sep 17"));
    }

    #[test]
    fn blank_sources_become_none() {
        let items = timeline_2011();
        let christmas = items.iter().find(|item| item.id == 21).map(|item| item.source.clone());
        assert_eq!(christmas, Some(None));
    }

    #[test]
    fn every_meme_has_an_image() {
        let memes = meme_sources();
        assert!(!memes.is_empty());
        assert!(memes.iter().all(|meme| meme.url.starts_with("https://")));
        assert!(memes.iter().any(|meme| meme.is_gif));
    }

    #[test]
    fn playlist_has_embeddable_tracks() {
        let tracks = music_2011();
        assert_eq!(tracks.len(), 11);
        assert_eq!(tracks.iter().filter(|track| track.youtube_id.is_some()).count(), 8);
    }
}
