use url::Url;

const EMBED_BASE: &str = "https://www.youtube-nocookie.com/embed/";

const WATCH_HOSTS: [&str; 3] = ["youtube.com", "m.youtube.com", "youtube-nocookie.com"];
const SHORT_HOSTS: [&str; 1] = ["youtu.be"];

/// YouTube ids are short tokens of letters, digits, `-` and `_`.
fn is_video_id(candidate: &str) -> bool {
    !candidate.is_empty()
        && candidate
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// Pull the video id out of a recognised YouTube URL.
fn video_id(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    let host = host.strip_prefix("www.").unwrap_or(host);
    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());

    if SHORT_HOSTS.contains(&host) {
        return segments.next().filter(|id| is_video_id(id)).map(str::to_string);
    }
    if !WATCH_HOSTS.contains(&host) {
        return None;
    }

    let id = match segments.next()? {
        "watch" => url
            .query_pairs()
            .find(|(k, _)| k == "v")
            .map(|(_, v)| v.into_owned()),
        "shorts" | "embed" => segments.next().map(str::to_string),
        _ => None,
    };
    id.filter(|id| is_video_id(id))
}

/// Build an embeddable player URL for a video link.
///
/// Recognised YouTube links (watch, shorts, embed and youtu.be forms) are
/// rewritten to the privacy-enhanced embed host with autoplay. A start offset
/// is added only when it is finite and positive. Anything else, including
/// unparsable input, is returned unchanged; check it with
/// [`is_frame_safe`] before using it as an iframe source.
pub fn embeddable_video_url(original: &str, start_seconds: Option<f64>) -> String {
    let Ok(url) = Url::parse(original) else {
        return original.to_string();
    };
    let Some(id) = video_id(&url) else {
        return original.to_string();
    };

    let Ok(mut embed) = Url::parse(EMBED_BASE) else {
        return original.to_string();
    };
    // The id is a single path segment appended to the fixed embed path.
    if let Ok(mut path) = embed.path_segments_mut() {
        path.pop_if_empty().push(&id);
    }
    {
        let mut query = embed.query_pairs_mut();
        if let Some(start) = start_seconds.filter(|s| s.is_finite() && *s > 0.0) {
            query.append_pair("start", &format_seconds(start));
        }
        query.append_pair("autoplay", "1");
        query.append_pair("rel", "0");
        query.append_pair("modestbranding", "1");
    }
    embed.to_string()
}

/// Only absolute http(s) URLs may be loaded in the player frame.
pub fn is_frame_safe(candidate: &str) -> bool {
    Url::parse(candidate).is_ok_and(|u| matches!(u.scheme(), "http" | "https"))
}

fn format_seconds(seconds: f64) -> String {
    if seconds.fract() == 0.0 {
        format!("{}", seconds as u64)
    } else {
        format!("{seconds}")
    }
}
