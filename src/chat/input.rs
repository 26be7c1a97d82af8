use crate::types::{Part, Turn};

/// Images at or below this many characters are treated as placeholders.
pub const MIN_IMAGE_LEN: usize = 100;

/// MIME type assumed for images sent without a `data:` URL prefix.
pub const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

/// Build the user turn for one request.
///
/// Parts are the trimmed message (if any) followed by the image (if it
/// passes the length filter). With neither, the turn carries the fallback
/// greeting.
pub fn build_user_turn(message: &str, image: Option<&str>) -> Turn {
    let mut parts = Vec::with_capacity(2);

    let text = message.trim();
    if !text.is_empty() {
        parts.push(Part::text(text));
    }

    if let Some(image) = image.filter(|raw| raw.len() > MIN_IMAGE_LEN) {
        let (mime_type, data) = split_data_url(image);
        parts.push(Part::inline(mime_type, data));
    }

    Turn::user(parts)
}

/// Split `data:<mime>;base64,<payload>` into its MIME type and payload.
/// Anything else is returned whole with [`DEFAULT_IMAGE_MIME`].
fn split_data_url(raw: &str) -> (&str, &str) {
    raw.strip_prefix("data:")
        .and_then(|rest| rest.split_once(','))
        .and_then(|(header, payload)| {
            let mime = header.strip_suffix(";base64")?;
            (!mime.is_empty()).then_some((mime, payload))
        })
        .unwrap_or((DEFAULT_IMAGE_MIME, raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Role, FALLBACK_GREETING};

    fn image_payload(len: usize) -> String {
        "A".repeat(len)
    }

    #[test]
    fn empty_request_falls_back_to_greeting() {
        let turn = build_user_turn("", None);
        assert_eq!(turn.role, Role::User);
        assert_eq!(turn.parts, vec![Part::text(FALLBACK_GREETING)]);
    }

    #[test]
    fn whitespace_message_counts_as_empty() {
        let turn = build_user_turn("  \n\t ", None);
        assert_eq!(turn.parts, vec![Part::text(FALLBACK_GREETING)]);
    }

    #[test]
    fn message_is_trimmed() {
        let turn = build_user_turn("  hello  ", None);
        assert_eq!(turn.parts, vec![Part::text("hello")]);
    }

    #[test]
    fn short_image_is_dropped() {
        let image = image_payload(MIN_IMAGE_LEN);
        let turn = build_user_turn("", Some(&image));
        assert_eq!(turn.parts, vec![Part::text(FALLBACK_GREETING)]);
    }

    #[test]
    fn text_then_image_in_order() {
        let image = image_payload(MIN_IMAGE_LEN + 1);
        let turn = build_user_turn("what is this?", Some(&image));

        assert_eq!(
            turn.parts,
            vec![
                Part::text("what is this?"),
                Part::inline(DEFAULT_IMAGE_MIME, image.as_str()),
            ]
        );
    }

    #[test]
    fn image_only_request_has_no_greeting() {
        let image = image_payload(500);
        let turn = build_user_turn("", Some(&image));
        assert_eq!(turn.parts, vec![Part::inline(DEFAULT_IMAGE_MIME, image.as_str())]);
    }

    #[test]
    fn data_url_prefix_sets_mime_type() {
        let payload = image_payload(200);
        let image = format!("data:image/png;base64,{payload}");
        let turn = build_user_turn("", Some(&image));
        assert_eq!(turn.parts, vec![Part::inline("image/png", payload.as_str())]);
    }

    #[test]
    fn malformed_data_url_is_sent_as_is() {
        let image = format!("data:;base64,{}", image_payload(200));
        let turn = build_user_turn("", Some(&image));
        assert_eq!(turn.parts, vec![Part::inline(DEFAULT_IMAGE_MIME, image.as_str())]);
    }
}
