// Static franchise directory.
//
// Maps every historical NBA franchise name (through relocations and renames)
// to the short token the stats API emits in a record's TEAM_NAME field.
// The table must stay in exact parallel with what the upstream service
// actually returns: a drifted token silently produces an empty filtered
// result rather than an error.

/// (full franchise name, upstream team-name token), in selector order.
pub const TEAM_TOKENS: &[(&str, &str)] = &[
    ("Atlanta Hawks", "Hawks"),
    ("Boston Celtics", "Celtics"),
    ("Brooklyn Nets", "Nets"),
    ("Buffalo Braves", "Braves"),
    ("Charlotte Bobcats", "Bobcats"),
    ("Charlotte Hornets", "Hornets"),
    ("Chicago Bulls", "Bulls"),
    ("Chicago Packers", "Packers"),
    ("Chicago Stags", "Stags"),
    ("Chicago Zephyrs", "Zephyrs"),
    ("Cincinnati Royals", "Royals"),
    ("Cleveland Cavaliers", "Cavaliers"),
    ("Dallas Mavericks", "Mavericks"),
    ("Denver Nuggets", "Nuggets"),
    ("Detroit Pistons", "Pistons"),
    ("Golden State Warriors", "Warriors"),
    ("Houston Rockets", "Rockets"),
    ("Indiana Pacers", "Pacers"),
    ("Indianapolis Jets", "Jets"),
    ("Indianapolis Olympians", "Olympians"),
    ("Los Angeles Clippers", "Clippers"),
    ("Los Angeles Lakers", "Lakers"),
    ("Memphis Grizzlies", "Grizzlies"),
    ("Miami Heat", "Heat"),
    ("Milwaukee Bucks", "Bucks"),
    ("Minnesota Timberwolves", "Timberwolves"),
    ("New Orleans Pelicans", "Pelicans"),
    ("New York Knicks", "Knicks"),
    ("Oklahoma City Thunder", "Thunder"),
    ("Orlando Magic", "Magic"),
    ("Philadelphia 76ers", "76ers"),
    ("Phoenix Suns", "Suns"),
    ("Pittsburgh Ironmen", "Ironmen"),
    ("Portland Trail Blazers", "Trail Blazers"),
    ("Providence Steamrollers", "Steamrollers"),
    ("Sacramento Kings", "Kings"),
    ("San Antonio Spurs", "Spurs"),
    ("Seattle SuperSonics", "SuperSonics"),
    ("Syracuse Nationals", "Nationals"),
    ("Toronto Huskies", "Huskies"),
    ("Toronto Raptors", "Raptors"),
    ("Tri-Cities Blackhawks", "Blackhawks"),
    ("Utah Jazz", "Jazz"),
    ("Washington Bullets", "Bullets"),
    ("Washington Capitols", "Capitols"),
    ("Washington Wizards", "Wizards"),
];

/// Resolve a full franchise name to its upstream team token.
pub fn resolve(full_name: &str) -> Option<&'static str> {
    TEAM_TOKENS
        .iter()
        .find(|(name, _)| *name == full_name)
        .map(|(_, token)| *token)
}

/// All full franchise names in table order, for the team selector.
pub fn franchise_names() -> impl Iterator<Item = &'static str> {
    TEAM_TOKENS.iter().map(|(name, _)| *name)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
