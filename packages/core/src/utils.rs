// ABOUTME: Shared utility functions for Postboard
// ABOUTME: Tag id generation and unique filenames for uploaded images

use chrono::Utc;
use rand::Rng;

/// Generate a fresh tag id
pub fn generate_tag_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// File extension for a MIME content type, empty when it cannot be derived
pub fn extension_for_content_type(content_type: &str) -> String {
    let Ok(mime) = content_type.parse::<mime::Mime>() else {
        return String::new();
    };

    if mime.type_() == mime::TEXT && mime.subtype() == mime::PLAIN {
        return "txt".to_string();
    }
    if mime.type_() == mime::APPLICATION && mime.subtype() == mime::OCTET_STREAM {
        return "bin".to_string();
    }

    // `image/svg+xml` parses with subtype `svg` and suffix `xml`
    let subtype = mime.subtype().as_str();
    if subtype.chars().all(|c| c.is_ascii_alphanumeric()) {
        subtype.to_ascii_lowercase()
    } else {
        String::new()
    }
}

/// Unique filename for an upload: `{unix_millis}-{random}.{ext}`
pub fn upload_filename(content_type: Option<&str>) -> String {
    let extension = content_type
        .map(extension_for_content_type)
        .unwrap_or_default();
    let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000_000);

    format!("{}-{}.{}", Utc::now().timestamp_millis(), suffix, extension)
}
