use url::Url;

/// Direct booking sites by IATA airline code
const BOOKING_SITES: &[(&str, &str)] = &[
    ("BA", "https://www.britishairways.com"),
    ("EK", "https://www.emirates.com"),
    ("VS", "https://www.virginatlantic.com"),
    ("LH", "https://www.lufthansa.com"),
    ("AF", "https://www.airfrance.com"),
    ("KL", "https://www.klm.com"),
    ("DL", "https://www.delta.com"),
    ("AA", "https://www.aa.com"),
    ("UA", "https://www.united.com"),
    ("QR", "https://www.qatarairways.com"),
    ("EY", "https://www.etihad.com"),
    ("SQ", "https://www.singaporeair.com"),
    ("AI", "https://www.airindia.com"),
    ("6E", "https://www.goindigo.in"),
    ("UK", "https://www.airvistara.com"),
    ("SG", "https://www.spicejet.com"),
    ("G8", "https://www.flygofirst.com"),
    ("IX", "https://www.airindiaexpress.com"),
];

const SEARCH_ENGINE: &str = "https://www.google.com/search";

/// Where to send a traveller who picked a booking partner.
///
/// Known airlines go straight to their own site; anything else becomes a web
/// search for "<name> airlines flight booking".
pub fn redirect_url(airline_code: &str, partner_name: &str) -> String {
    if let Some((_, site)) = BOOKING_SITES
        .iter()
        .find(|(code, _)| code.eq_ignore_ascii_case(airline_code))
    {
        return site.to_string();
    }

    let query = format!("{} airlines flight booking", partner_name);
    match Url::parse_with_params(SEARCH_ENGINE, &[("q", query.as_str())]) {
        Ok(url) => url.to_string(),
        Err(_) => SEARCH_ENGINE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_airline() {
        assert_eq!(redirect_url("6E", "IndiGo"), "https://www.goindigo.in");
        assert_eq!(redirect_url("ba", "MakeMyTrip"), "https://www.britishairways.com");
    }

    #[test]
    fn test_unknown_airline_falls_back_to_search() {
        assert_eq!(
            redirect_url("ZZ", "Akasa Air"),
            "https://www.google.com/search?q=Akasa+Air+airlines+flight+booking"
        );
    }
}
