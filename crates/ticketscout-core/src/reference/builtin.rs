//! Records compiled into the binary. Marketplace ids only come from dataset files.

use super::record::{League, TeamRecord};

struct Builtin {
    key: &'static str,
    league: League,
    name: &'static str,
    city: &'static str,
    venue: &'static str,
    latitude: f64,
    longitude: f64,
    variations: &'static [&'static str],
    city_aliases: &'static [&'static str],
}

macro_rules! record {
    ($key:literal, $league:ident, $name:literal, $city:literal, $venue:literal, $lat:literal, $lon:literal, [$($variation:literal),*], $aliases:expr) => {
        Builtin {
            key: $key,
            league: League::$league,
            name: $name,
            city: $city,
            venue: $venue,
            latitude: $lat,
            longitude: $lon,
            variations: &[$($variation),*],
            city_aliases: $aliases,
        }
    };
}

const NEW_YORK: &[&str] = &["new york", "ny", "nyc", "new york city"];
const NEW_JERSEY: &[&str] = &["new york", "ny", "nyc", "new jersey", "nj", "east rutherford"];
const BOSTON: &[&str] = &["boston", "new england"];
const CHICAGO: &[&str] = &["chicago", "chi"];
const LOS_ANGELES: &[&str] = &["los angeles", "la", "l a"];
const SF_BAY: &[&str] = &["san francisco", "sf", "bay area"];
const PHILADELPHIA: &[&str] = &["philadelphia", "philly"];
const WASHINGTON: &[&str] = &["washington", "dc", "washington dc"];
const DALLAS: &[&str] = &["dallas", "dfw", "arlington", "texas"];
const HOUSTON: &[&str] = &["houston", "texas"];
const MIAMI: &[&str] = &["miami", "south florida", "florida"];
const TORONTO: &[&str] = &["toronto"];
const DENVER: &[&str] = &["denver", "colorado"];
const DETROIT: &[&str] = &["detroit", "michigan"];
const MINNEAPOLIS: &[&str] = &["minneapolis", "minnesota", "twin cities", "st paul"];
const PHOENIX: &[&str] = &["phoenix", "arizona", "glendale"];
const ATLANTA: &[&str] = &["atlanta", "atl"];
const TAMPA: &[&str] = &["tampa", "tampa bay", "st petersburg"];
const SEATTLE: &[&str] = &["seattle"];
const PITTSBURGH: &[&str] = &["pittsburgh"];
const CLEVELAND: &[&str] = &["cleveland", "ohio"];
const ST_LOUIS: &[&str] = &["st louis", "saint louis", "stl"];
const KANSAS_CITY: &[&str] = &["kansas city", "kc"];
const SALT_LAKE: &[&str] = &["salt lake city", "utah", "slc"];

const BUILTIN: &[Builtin] = &[
    // MLB
    record!("arizona_diamondbacks", Mlb, "Arizona Diamondbacks", "Phoenix", "Chase Field", 33.4455, -112.0667, ["d backs", "dbacks"], PHOENIX),
    record!("atlanta_braves", Mlb, "Atlanta Braves", "Atlanta", "Truist Park", 33.8907, -84.4677, [], ATLANTA),
    record!("baltimore_orioles", Mlb, "Baltimore Orioles", "Baltimore", "Oriole Park at Camden Yards", 39.2838, -76.6217, [], &["baltimore"]),
    record!("boston_red_sox", Mlb, "Boston Red Sox", "Boston", "Fenway Park", 42.3467, -71.0972, [], BOSTON),
    record!("chicago_cubs", Mlb, "Chicago Cubs", "Chicago", "Wrigley Field", 41.9484, -87.6553, ["cubbies"], CHICAGO),
    record!("chicago_white_sox", Mlb, "Chicago White Sox", "Chicago", "Rate Field", 41.8299, -87.6338, ["chisox"], CHICAGO),
    record!("cincinnati_reds", Mlb, "Cincinnati Reds", "Cincinnati", "Great American Ball Park", 39.0975, -84.5066, [], &["cincinnati", "cincy"]),
    record!("cleveland_guardians", Mlb, "Cleveland Guardians", "Cleveland", "Progressive Field", 41.4962, -81.6852, [], CLEVELAND),
    record!("colorado_rockies", Mlb, "Colorado Rockies", "Denver", "Coors Field", 39.7559, -104.9942, [], DENVER),
    record!("detroit_tigers", Mlb, "Detroit Tigers", "Detroit", "Comerica Park", 42.3390, -83.0485, [], DETROIT),
    record!("houston_astros", Mlb, "Houston Astros", "Houston", "Daikin Park", 29.7573, -95.3555, ["stros"], HOUSTON),
    record!("kansas_city_royals", Mlb, "Kansas City Royals", "Kansas City", "Kauffman Stadium", 39.0517, -94.4803, [], KANSAS_CITY),
    record!("los_angeles_angels", Mlb, "Los Angeles Angels", "Anaheim", "Angel Stadium", 33.8003, -117.8827, ["angels of anaheim", "halos"], &["anaheim", "los angeles", "la", "orange county"]),
    record!("los_angeles_dodgers", Mlb, "Los Angeles Dodgers", "Los Angeles", "Dodger Stadium", 34.0739, -118.2400, [], LOS_ANGELES),
    record!("miami_marlins", Mlb, "Miami Marlins", "Miami", "loanDepot park", 25.7781, -80.2197, ["florida marlins"], MIAMI),
    record!("milwaukee_brewers", Mlb, "Milwaukee Brewers", "Milwaukee", "American Family Field", 43.0280, -87.9712, ["brew crew"], &["milwaukee", "wisconsin"]),
    record!("minnesota_twins", Mlb, "Minnesota Twins", "Minneapolis", "Target Field", 44.9817, -93.2776, [], MINNEAPOLIS),
    record!("new_york_mets", Mlb, "New York Mets", "New York", "Citi Field", 40.7571, -73.8458, ["amazins"], &["new york", "ny", "nyc", "new york city", "queens"]),
    record!("new_york_yankees", Mlb, "New York Yankees", "New York", "Yankee Stadium", 40.8296, -73.9262, ["yanks", "bronx bombers"], &["new york", "ny", "nyc", "new york city", "bronx"]),
    record!("athletics", Mlb, "Athletics", "Sacramento", "Sutter Health Park", 38.5804, -121.5135, ["oakland athletics", "sacramento athletics"], &["sacramento", "west sacramento", "oakland"]),
    record!("philadelphia_phillies", Mlb, "Philadelphia Phillies", "Philadelphia", "Citizens Bank Park", 39.9061, -75.1665, ["phils"], PHILADELPHIA),
    record!("pittsburgh_pirates", Mlb, "Pittsburgh Pirates", "Pittsburgh", "PNC Park", 40.4469, -80.0057, ["bucs"], PITTSBURGH),
    record!("san_diego_padres", Mlb, "San Diego Padres", "San Diego", "Petco Park", 32.7073, -117.1566, ["friars"], &["san diego", "sd"]),
    record!("san_francisco_giants", Mlb, "San Francisco Giants", "San Francisco", "Oracle Park", 37.7786, -122.3893, [], SF_BAY),
    record!("seattle_mariners", Mlb, "Seattle Mariners", "Seattle", "T-Mobile Park", 47.5914, -122.3325, [], SEATTLE),
    record!("st_louis_cardinals", Mlb, "St. Louis Cardinals", "St. Louis", "Busch Stadium", 38.6226, -90.1928, ["cards", "redbirds"], ST_LOUIS),
    record!("tampa_bay_rays", Mlb, "Tampa Bay Rays", "St. Petersburg", "Tropicana Field", 27.7682, -82.6534, [], TAMPA),
    record!("texas_rangers", Mlb, "Texas Rangers", "Arlington", "Globe Life Field", 32.7473, -97.0847, [], DALLAS),
    record!("toronto_blue_jays", Mlb, "Toronto Blue Jays", "Toronto", "Rogers Centre", 43.6414, -79.3894, ["jays"], TORONTO),
    record!("washington_nationals", Mlb, "Washington Nationals", "Washington", "Nationals Park", 38.8730, -77.0074, ["nats"], WASHINGTON),
    // NFL
    record!("arizona_cardinals", Nfl, "Arizona Cardinals", "Glendale", "State Farm Stadium", 33.5276, -112.2626, [], PHOENIX),
    record!("atlanta_falcons", Nfl, "Atlanta Falcons", "Atlanta", "Mercedes-Benz Stadium", 33.7554, -84.4008, [], ATLANTA),
    record!("baltimore_ravens", Nfl, "Baltimore Ravens", "Baltimore", "M&T Bank Stadium", 39.2780, -76.6227, [], &["baltimore"]),
    record!("buffalo_bills", Nfl, "Buffalo Bills", "Orchard Park", "Highmark Stadium", 42.7738, -78.7870, [], &["buffalo", "orchard park"]),
    record!("carolina_panthers", Nfl, "Carolina Panthers", "Charlotte", "Bank of America Stadium", 35.2258, -80.8528, [], &["carolina", "charlotte"]),
    record!("chicago_bears", Nfl, "Chicago Bears", "Chicago", "Soldier Field", 41.8623, -87.6167, [], CHICAGO),
    record!("cincinnati_bengals", Nfl, "Cincinnati Bengals", "Cincinnati", "Paycor Stadium", 39.0955, -84.5161, [], &["cincinnati", "cincy"]),
    record!("cleveland_browns", Nfl, "Cleveland Browns", "Cleveland", "Huntington Bank Field", 41.5061, -81.6995, [], CLEVELAND),
    record!("dallas_cowboys", Nfl, "Dallas Cowboys", "Arlington", "AT&T Stadium", 32.7473, -97.0945, ["boys"], DALLAS),
    record!("denver_broncos", Nfl, "Denver Broncos", "Denver", "Empower Field at Mile High", 39.7439, -105.0201, [], DENVER),
    record!("detroit_lions", Nfl, "Detroit Lions", "Detroit", "Ford Field", 42.3400, -83.0456, [], DETROIT),
    record!("green_bay_packers", Nfl, "Green Bay Packers", "Green Bay", "Lambeau Field", 44.5013, -88.0622, ["pack"], &["green bay", "wisconsin"]),
    record!("houston_texans", Nfl, "Houston Texans", "Houston", "NRG Stadium", 29.6847, -95.4107, [], &["houston"]),
    record!("indianapolis_colts", Nfl, "Indianapolis Colts", "Indianapolis", "Lucas Oil Stadium", 39.7601, -86.1639, [], &["indianapolis", "indy", "indiana"]),
    record!("jacksonville_jaguars", Nfl, "Jacksonville Jaguars", "Jacksonville", "EverBank Stadium", 30.3239, -81.6373, ["jags"], &["jacksonville", "jax"]),
    record!("kansas_city_chiefs", Nfl, "Kansas City Chiefs", "Kansas City", "GEHA Field at Arrowhead Stadium", 39.0489, -94.4839, [], KANSAS_CITY),
    record!("las_vegas_raiders", Nfl, "Las Vegas Raiders", "Las Vegas", "Allegiant Stadium", 36.0909, -115.1833, ["oakland raiders"], &["las vegas", "vegas", "lv"]),
    record!("los_angeles_chargers", Nfl, "Los Angeles Chargers", "Inglewood", "SoFi Stadium", 33.9535, -118.3392, ["bolts"], &["los angeles", "la", "inglewood"]),
    record!("los_angeles_rams", Nfl, "Los Angeles Rams", "Inglewood", "SoFi Stadium", 33.9535, -118.3392, [], &["los angeles", "la", "inglewood"]),
    record!("miami_dolphins", Nfl, "Miami Dolphins", "Miami Gardens", "Hard Rock Stadium", 25.9580, -80.2389, ["fins"], MIAMI),
    record!("minnesota_vikings", Nfl, "Minnesota Vikings", "Minneapolis", "U.S. Bank Stadium", 44.9737, -93.2581, ["vikes"], MINNEAPOLIS),
    record!("new_england_patriots", Nfl, "New England Patriots", "Foxborough", "Gillette Stadium", 42.0909, -71.2643, ["pats"], &["new england", "boston", "foxborough", "foxboro"]),
    record!("new_orleans_saints", Nfl, "New Orleans Saints", "New Orleans", "Caesars Superdome", 29.9511, -90.0812, [], &["new orleans", "nola"]),
    record!("new_york_giants", Nfl, "New York Giants", "East Rutherford", "MetLife Stadium", 40.8135, -74.0745, ["big blue"], NEW_JERSEY),
    record!("new_york_jets", Nfl, "New York Jets", "East Rutherford", "MetLife Stadium", 40.8135, -74.0745, ["gang green"], NEW_JERSEY),
    record!("philadelphia_eagles", Nfl, "Philadelphia Eagles", "Philadelphia", "Lincoln Financial Field", 39.9008, -75.1675, ["birds"], PHILADELPHIA),
    record!("pittsburgh_steelers", Nfl, "Pittsburgh Steelers", "Pittsburgh", "Acrisure Stadium", 40.4468, -80.0158, [], PITTSBURGH),
    record!("san_francisco_49ers", Nfl, "San Francisco 49ers", "Santa Clara", "Levi's Stadium", 37.4030, -121.9700, ["niners", "forty niners"], &["san francisco", "sf", "bay area", "santa clara"]),
    record!("seattle_seahawks", Nfl, "Seattle Seahawks", "Seattle", "Lumen Field", 47.5952, -122.3316, [], SEATTLE),
    record!("tampa_bay_buccaneers", Nfl, "Tampa Bay Buccaneers", "Tampa", "Raymond James Stadium", 27.9759, -82.5033, ["bucs"], TAMPA),
    record!("tennessee_titans", Nfl, "Tennessee Titans", "Nashville", "Nissan Stadium", 36.1665, -86.7713, [], &["tennessee", "nashville"]),
    record!("washington_commanders", Nfl, "Washington Commanders", "Landover", "Northwest Stadium", 38.9077, -76.8645, [], &["washington", "dc", "washington dc", "landover"]),
    // NBA
    record!("atlanta_hawks", Nba, "Atlanta Hawks", "Atlanta", "State Farm Arena", 33.7573, -84.3963, [], ATLANTA),
    record!("boston_celtics", Nba, "Boston Celtics", "Boston", "TD Garden", 42.3662, -71.0621, ["celts"], BOSTON),
    record!("brooklyn_nets", Nba, "Brooklyn Nets", "Brooklyn", "Barclays Center", 40.6826, -73.9754, [], &["brooklyn", "new york", "ny", "nyc"]),
    record!("charlotte_hornets", Nba, "Charlotte Hornets", "Charlotte", "Spectrum Center", 35.2251, -80.8392, [], &["charlotte", "carolina"]),
    record!("chicago_bulls", Nba, "Chicago Bulls", "Chicago", "United Center", 41.8807, -87.6742, [], CHICAGO),
    record!("cleveland_cavaliers", Nba, "Cleveland Cavaliers", "Cleveland", "Rocket Arena", 41.4965, -81.6882, ["cavs"], CLEVELAND),
    record!("dallas_mavericks", Nba, "Dallas Mavericks", "Dallas", "American Airlines Center", 32.7905, -96.8103, ["mavs"], &["dallas", "dfw", "texas"]),
    record!("denver_nuggets", Nba, "Denver Nuggets", "Denver", "Ball Arena", 39.7487, -105.0077, [], DENVER),
    record!("detroit_pistons", Nba, "Detroit Pistons", "Detroit", "Little Caesars Arena", 42.3411, -83.0553, [], DETROIT),
    record!("golden_state_warriors", Nba, "Golden State Warriors", "San Francisco", "Chase Center", 37.7680, -122.3877, ["dubs"], &["golden state", "san francisco", "sf", "bay area", "oakland"]),
    record!("houston_rockets", Nba, "Houston Rockets", "Houston", "Toyota Center", 29.7508, -95.3621, [], HOUSTON),
    record!("indiana_pacers", Nba, "Indiana Pacers", "Indianapolis", "Gainbridge Fieldhouse", 39.7640, -86.1555, [], &["indiana", "indianapolis", "indy"]),
    record!("los_angeles_clippers", Nba, "Los Angeles Clippers", "Inglewood", "Intuit Dome", 33.9447, -118.3414, ["clips"], &["los angeles", "la", "inglewood"]),
    record!("los_angeles_lakers", Nba, "Los Angeles Lakers", "Los Angeles", "Crypto.com Arena", 34.0430, -118.2673, [], LOS_ANGELES),
    record!("memphis_grizzlies", Nba, "Memphis Grizzlies", "Memphis", "FedExForum", 35.1382, -90.0506, ["grizz"], &["memphis", "tennessee"]),
    record!("miami_heat", Nba, "Miami Heat", "Miami", "Kaseya Center", 25.7814, -80.1870, [], MIAMI),
    record!("milwaukee_bucks", Nba, "Milwaukee Bucks", "Milwaukee", "Fiserv Forum", 43.0451, -87.9172, [], &["milwaukee", "wisconsin"]),
    record!("minnesota_timberwolves", Nba, "Minnesota Timberwolves", "Minneapolis", "Target Center", 44.9795, -93.2761, ["wolves", "t wolves"], MINNEAPOLIS),
    record!("new_orleans_pelicans", Nba, "New Orleans Pelicans", "New Orleans", "Smoothie King Center", 29.9490, -90.0821, ["pels"], &["new orleans", "nola"]),
    record!("new_york_knicks", Nba, "New York Knicks", "New York", "Madison Square Garden", 40.7505, -73.9934, ["knickerbockers"], NEW_YORK),
    record!("oklahoma_city_thunder", Nba, "Oklahoma City Thunder", "Oklahoma City", "Paycom Center", 35.4634, -97.5151, [], &["oklahoma city", "okc", "oklahoma"]),
    record!("orlando_magic", Nba, "Orlando Magic", "Orlando", "Kia Center", 28.5392, -81.3839, [], &["orlando", "florida"]),
    record!("philadelphia_76ers", Nba, "Philadelphia 76ers", "Philadelphia", "Xfinity Mobile Arena", 39.9012, -75.1720, ["sixers"], PHILADELPHIA),
    record!("phoenix_suns", Nba, "Phoenix Suns", "Phoenix", "PHX Arena", 33.4457, -112.0712, [], PHOENIX),
    record!("portland_trail_blazers", Nba, "Portland Trail Blazers", "Portland", "Moda Center", 45.5316, -122.6668, ["blazers"], &["portland", "oregon"]),
    record!("sacramento_kings", Nba, "Sacramento Kings", "Sacramento", "Golden 1 Center", 38.5802, -121.4997, [], &["sacramento"]),
    record!("san_antonio_spurs", Nba, "San Antonio Spurs", "San Antonio", "Frost Bank Center", 29.4270, -98.4375, [], &["san antonio", "texas"]),
    record!("toronto_raptors", Nba, "Toronto Raptors", "Toronto", "Scotiabank Arena", 43.6435, -79.3791, ["raps"], TORONTO),
    record!("utah_jazz", Nba, "Utah Jazz", "Salt Lake City", "Delta Center", 40.7683, -111.9011, [], SALT_LAKE),
    record!("washington_wizards", Nba, "Washington Wizards", "Washington", "Capital One Arena", 38.8981, -77.0209, ["wiz"], WASHINGTON),
    // NHL
    record!("anaheim_ducks", Nhl, "Anaheim Ducks", "Anaheim", "Honda Center", 33.8078, -117.8765, [], &["anaheim", "orange county"]),
    record!("boston_bruins", Nhl, "Boston Bruins", "Boston", "TD Garden", 42.3662, -71.0621, [], BOSTON),
    record!("buffalo_sabres", Nhl, "Buffalo Sabres", "Buffalo", "KeyBank Center", 42.8750, -78.8764, [], &["buffalo"]),
    record!("calgary_flames", Nhl, "Calgary Flames", "Calgary", "Scotiabank Saddledome", 51.0374, -114.0519, [], &["calgary"]),
    record!("carolina_hurricanes", Nhl, "Carolina Hurricanes", "Raleigh", "Lenovo Center", 35.8033, -78.7219, ["canes"], &["carolina", "raleigh"]),
    record!("chicago_blackhawks", Nhl, "Chicago Blackhawks", "Chicago", "United Center", 41.8807, -87.6742, [], CHICAGO),
    record!("colorado_avalanche", Nhl, "Colorado Avalanche", "Denver", "Ball Arena", 39.7487, -105.0077, ["avs"], DENVER),
    record!("columbus_blue_jackets", Nhl, "Columbus Blue Jackets", "Columbus", "Nationwide Arena", 39.9693, -83.0061, ["cbj"], &["columbus", "ohio"]),
    record!("dallas_stars", Nhl, "Dallas Stars", "Dallas", "American Airlines Center", 32.7905, -96.8103, [], &["dallas", "dfw", "texas"]),
    record!("detroit_red_wings", Nhl, "Detroit Red Wings", "Detroit", "Little Caesars Arena", 42.3411, -83.0553, [], DETROIT),
    record!("edmonton_oilers", Nhl, "Edmonton Oilers", "Edmonton", "Rogers Place", 53.5469, -113.4979, [], &["edmonton"]),
    record!("florida_panthers", Nhl, "Florida Panthers", "Sunrise", "Amerant Bank Arena", 26.1584, -80.3256, ["cats"], &["florida", "sunrise", "south florida", "miami"]),
    record!("los_angeles_kings", Nhl, "Los Angeles Kings", "Los Angeles", "Crypto.com Arena", 34.0430, -118.2673, [], LOS_ANGELES),
    record!("minnesota_wild", Nhl, "Minnesota Wild", "St. Paul", "Xcel Energy Center", 44.9448, -93.1010, [], MINNEAPOLIS),
    record!("montreal_canadiens", Nhl, "Montreal Canadiens", "Montreal", "Bell Centre", 45.4961, -73.5693, ["habs"], &["montreal"]),
    record!("nashville_predators", Nhl, "Nashville Predators", "Nashville", "Bridgestone Arena", 36.1592, -86.7785, ["preds"], &["nashville", "tennessee"]),
    record!("new_jersey_devils", Nhl, "New Jersey Devils", "Newark", "Prudential Center", 40.7335, -74.1711, [], &["new jersey", "nj", "newark"]),
    record!("new_york_islanders", Nhl, "New York Islanders", "Elmont", "UBS Arena", 40.7117, -73.7257, ["isles"], &["new york", "ny", "nyc", "long island", "elmont"]),
    record!("new_york_rangers", Nhl, "New York Rangers", "New York", "Madison Square Garden", 40.7505, -73.9934, ["blueshirts"], NEW_YORK),
    record!("ottawa_senators", Nhl, "Ottawa Senators", "Ottawa", "Canadian Tire Centre", 45.2969, -75.9271, ["sens"], &["ottawa"]),
    record!("philadelphia_flyers", Nhl, "Philadelphia Flyers", "Philadelphia", "Xfinity Mobile Arena", 39.9012, -75.1720, [], PHILADELPHIA),
    record!("pittsburgh_penguins", Nhl, "Pittsburgh Penguins", "Pittsburgh", "PPG Paints Arena", 40.4395, -79.9892, ["pens"], PITTSBURGH),
    record!("san_jose_sharks", Nhl, "San Jose Sharks", "San Jose", "SAP Center", 37.3327, -121.9010, [], &["san jose", "bay area"]),
    record!("seattle_kraken", Nhl, "Seattle Kraken", "Seattle", "Climate Pledge Arena", 47.6221, -122.3540, [], SEATTLE),
    record!("st_louis_blues", Nhl, "St. Louis Blues", "St. Louis", "Enterprise Center", 38.6268, -90.2027, [], ST_LOUIS),
    record!("tampa_bay_lightning", Nhl, "Tampa Bay Lightning", "Tampa", "Benchmark International Arena", 27.9427, -82.4519, ["bolts"], TAMPA),
    record!("toronto_maple_leafs", Nhl, "Toronto Maple Leafs", "Toronto", "Scotiabank Arena", 43.6435, -79.3791, ["leafs"], TORONTO),
    record!("utah_mammoth", Nhl, "Utah Mammoth", "Salt Lake City", "Delta Center", 40.7683, -111.9011, ["utah hockey club"], SALT_LAKE),
    record!("vancouver_canucks", Nhl, "Vancouver Canucks", "Vancouver", "Rogers Arena", 49.2778, -123.1089, ["nucks"], &["vancouver"]),
    record!("vegas_golden_knights", Nhl, "Vegas Golden Knights", "Las Vegas", "T-Mobile Arena", 36.1029, -115.1784, ["knights"], &["las vegas", "vegas", "lv"]),
    record!("washington_capitals", Nhl, "Washington Capitals", "Washington", "Capital One Arena", 38.8981, -77.0209, ["caps"], WASHINGTON),
    record!("winnipeg_jets", Nhl, "Winnipeg Jets", "Winnipeg", "Canada Life Centre", 49.8927, -97.1436, [], &["winnipeg"]),
    // Venues
    record!("madison_square_garden", Venue, "Madison Square Garden", "New York", "Madison Square Garden", 40.7505, -73.9934, ["msg"], NEW_YORK),
];

/// The compiled-in table, full names first in each record's variations.
pub fn records() -> Vec<TeamRecord> {
    BUILTIN
        .iter()
        .map(|builtin| {
            let mut record = TeamRecord {
                key: builtin.key.to_owned(),
                league: builtin.league,
                name: builtin.name.to_owned(),
                city: builtin.city.to_owned(),
                venue_name: builtin.venue.to_owned(),
                latitude: builtin.latitude,
                longitude: builtin.longitude,
                venue_id: None,
                performer_id: None,
                variations: Vec::new(),
                city_aliases: Vec::new(),
            };
            record.add_variation(builtin.name);
            for variation in builtin.variations {
                record.add_variation(variation);
            }
            record.add_city_alias(builtin.city);
            for alias in builtin.city_aliases {
                record.add_city_alias(alias);
            }
            record
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn keys_are_unique_lowercase_ids() {
        let records = records();
        let keys = records.iter().map(|record| record.key.as_str()).collect::<HashSet<_>>();

        assert_eq!(keys.len(), records.len());
        assert!(records
            .iter()
            .all(|record| record.key == record.key.to_ascii_lowercase()));
    }

    #[test]
    fn every_record_has_a_nickname_and_plausible_coordinates() {
        for record in records() {
            assert!(
                !record.nickname_sets().is_empty(),
                "{} has no non-city name tokens",
                record.key
            );
            assert!((24.0..=54.0).contains(&record.latitude), "{}", record.key);
            assert!((-124.0..=-70.0).contains(&record.longitude), "{}", record.key);
            assert!(record.venue_id.is_none() && record.performer_id.is_none());
        }
    }

    #[test]
    fn chicago_has_teams_in_several_leagues() {
        let leagues = records()
            .into_iter()
            .filter(|record| record.city == "Chicago")
            .map(|record| record.league)
            .collect::<HashSet<_>>();
        assert!(leagues.len() >= 3);
    }
}
