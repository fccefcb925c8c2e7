//! Upstream URL construction
//!
//! The handle comes straight from the caller's query string, so it is always
//! added through `url`'s segment and query-pair encoders rather than spliced
//! into a format string.

use url::Url;

use super::UpstreamError;

/// Profile by username, with the pinned tweet expanded
pub fn profile_url(api_base: &Url, handle: &str) -> Result<Url, UpstreamError> {
    // `url` drops dot segments instead of encoding them, which would change the endpoint
    if matches!(handle, "." | "..") {
        return Err(UpstreamError::InvalidUrl(format!(
            "handle {handle:?} is not a valid path segment"
        )));
    }
    let mut url = with_path(api_base, &["2", "users", "by", "username", handle])?;
    url.query_pairs_mut()
        .append_pair("expansions", "pinned_tweet_id")
        .append_pair("tweet.fields", "author_id")
        .append_pair("user.fields", "profile_image_url");
    Ok(url)
}

/// Most recent non-reply tweet of `handle`, extended text mode
pub fn timeline_url(api_base: &Url, handle: &str) -> Result<Url, UpstreamError> {
    let mut url = with_path(api_base, &["1.1", "statuses", "user_timeline.json"])?;
    url.query_pairs_mut()
        .append_pair("screen_name", handle)
        .append_pair("count", "1")
        .append_pair("exclude_replies", "true")
        .append_pair("tweet_mode", "extended");
    Ok(url)
}

/// Tweet lookup by id
pub fn tweet_url(api_base: &Url, tweet_id: &str) -> Result<Url, UpstreamError> {
    let mut url = with_path(api_base, &["2", "tweets"])?;
    url.query_pairs_mut().append_pair("ids", tweet_id);
    Ok(url)
}

/// `Origin` value for a target URL: scheme, host and non-default port
pub fn origin_of(url: &Url) -> String {
    url.origin().ascii_serialization()
}

fn with_path(api_base: &Url, segments: &[&str]) -> Result<Url, UpstreamError> {
    let mut url = api_base.clone();
    url.set_query(None);
    url.set_fragment(None);
    url.path_segments_mut()
        .map_err(|()| UpstreamError::InvalidUrl(format!("{api_base} cannot be a base")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://api.twitter.com").unwrap()
    }

    #[test]
    fn test_profile_url() {
        let url = profile_url(&base(), "alice").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.twitter.com/2/users/by/username/alice?expansions=pinned_tweet_id&tweet.fields=author_id&user.fields=profile_image_url"
        );
    }

    #[test]
    fn test_profile_url_empty_handle_keeps_empty_segment() {
        let url = profile_url(&base(), "").unwrap();
        assert_eq!(url.path(), "/2/users/by/username/");
    }

    #[test]
    fn test_handle_is_percent_encoded() {
        let url = profile_url(&base(), "a/../b?x=1#f").unwrap();
        assert_eq!(url.path(), "/2/users/by/username/a%2F..%2Fb%3Fx=1%23f");
        assert_eq!(url.fragment(), None);

        for dots in [".", ".."] {
            assert!(matches!(
                profile_url(&base(), dots),
                Err(UpstreamError::InvalidUrl(_))
            ));
        }
        let url = profile_url(&base(), "...").unwrap();
        assert_eq!(url.path(), "/2/users/by/username/...");

        let url = timeline_url(&base(), "..").unwrap();
        assert_eq!(url.query_pairs().next().unwrap().1, "..");

        let url = timeline_url(&base(), "bob&count=200").unwrap();
        let pairs: Vec<_> = url.query_pairs().collect();
        assert_eq!(pairs[0].1, "bob&count=200");
        assert_eq!(pairs.iter().filter(|(k, _)| k == "count").count(), 1);
    }

    #[test]
    fn test_timeline_url() {
        let url = timeline_url(&base(), "bob").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.twitter.com/1.1/statuses/user_timeline.json?screen_name=bob&count=1&exclude_replies=true&tweet_mode=extended"
        );
    }

    #[test]
    fn test_tweet_url() {
        let url = tweet_url(&base(), "123").unwrap();
        assert_eq!(url.as_str(), "https://api.twitter.com/2/tweets?ids=123");
    }

    #[test]
    fn test_base_with_path_prefix() {
        let base = Url::parse("http://127.0.0.1:9000/mirror/").unwrap();
        let url = tweet_url(&base, "1").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9000/mirror/2/tweets?ids=1");
    }

    #[test]
    fn test_origin_of() {
        let url = tweet_url(&base(), "1").unwrap();
        assert_eq!(origin_of(&url), "https://api.twitter.com");

        let url = Url::parse("http://127.0.0.1:9000/2/tweets?ids=1").unwrap();
        assert_eq!(origin_of(&url), "http://127.0.0.1:9000");

        let url = Url::parse("https://api.twitter.com:443/x").unwrap();
        assert_eq!(origin_of(&url), "https://api.twitter.com");
    }

    #[test]
    fn test_non_base_url_rejected() {
        let base = Url::parse("mailto:someone@example.com").unwrap();
        assert!(matches!(
            tweet_url(&base, "1"),
            Err(UpstreamError::InvalidUrl(_))
        ));
    }
}
