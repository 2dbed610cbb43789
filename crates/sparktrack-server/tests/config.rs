use std::time::Duration;

use sparktrack_server::config::{MAX_TOKEN_TTL_SECS, parse_token_ttl};

#[test]
fn token_ttl_accepts_whole_seconds_in_range() {
    assert_eq!(parse_token_ttl("3600").unwrap(), Duration::from_secs(3600));
    assert_eq!(
        parse_token_ttl(&MAX_TOKEN_TTL_SECS.to_string()).unwrap(),
        Duration::from_secs(MAX_TOKEN_TTL_SECS)
    );
}

#[test]
fn token_ttl_out_of_range_is_a_config_error() {
    assert!(parse_token_ttl("0").is_err());
    assert!(parse_token_ttl(&(MAX_TOKEN_TTL_SECS + 1).to_string()).is_err());
    assert!(parse_token_ttl(&u64::MAX.to_string()).is_err());
    assert!(parse_token_ttl("eight hours").is_err());
}
