use skyfare_shared::Airport;

/// (code, city, name, country) for the quick-pick list in the search form
const POPULAR: &[(&str, &str, &str, &str)] = &[
    ("BLR", "Bengaluru", "Kempegowda International Airport", "India"),
    ("SXV", "Salem", "Salem Airport", "India"),
    ("MYQ", "Mysore", "Mysore Airport", "India"),
    ("DEL", "Delhi", "Indira Gandhi International Airport", "India"),
    ("BOM", "Mumbai", "Chhatrapati Shivaji Maharaj", "India"),
    ("AGR", "Agra", "Agra Airport", "India"),
    ("GOI", "Goa", "Goa International Airport", "India"),
    ("HYD", "Hyderabad", "Rajiv Gandhi International", "India"),
    ("MAA", "Chennai", "Chennai International Airport", "India"),
    ("CCU", "Kolkata", "Netaji Subhas Chandra Bose", "India"),
    ("DXB", "Dubai", "Dubai International Airport", "UAE"),
    ("SIN", "Singapore", "Changi Airport", "Singapore"),
    ("LHR", "London", "Heathrow Airport", "UK"),
];

const CITY_NAMES: &[(&str, &str)] = &[
    ("DEL", "Delhi"),
    ("AGR", "Agra"),
    ("BOM", "Mumbai"),
    ("BLR", "Bangalore"),
    ("LHR", "London"),
    ("DXB", "Dubai"),
    ("SIN", "Singapore"),
    ("HYD", "Hyderabad"),
    ("MAA", "Chennai"),
    ("CCU", "Kolkata"),
    ("GOI", "Goa"),
    ("MYQ", "Mysore"),
    ("SXV", "Salem"),
];

pub fn popular_airports() -> Vec<Airport> {
    POPULAR
        .iter()
        .map(|(code, city, name, country)| Airport {
            code: code.to_string(),
            city: city.to_string(),
            name: name.to_string(),
            country: country.to_string(),
        })
        .collect()
}

/// City for an IATA code, or the code itself when unknown.
pub fn city_name(code: &str) -> &str {
    CITY_NAMES
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map(|(_, city)| *city)
        .unwrap_or(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_name_lookup() {
        assert_eq!(city_name("BLR"), "Bangalore");
        assert_eq!(city_name("goi"), "Goa");
        assert_eq!(city_name("JFK"), "JFK");
    }

    #[test]
    fn test_popular_airports() {
        let airports = popular_airports();
        assert_eq!(airports.len(), 13);
        assert_eq!(airports[0].label(), "Bengaluru (BLR)");
    }
}
