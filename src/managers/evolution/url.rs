/// Composes the gateway URL for `path`.
///
/// `/message/*` and `/chat/*` get `/{instance}` appended, and
/// `connectionState` becomes `connectionState/{instance}`. Other
/// `/instance/*` paths are left untouched; the gateway's routing for them is
/// not known, so they are passed through as given.
pub fn build_url(base_url: &str, instance: &str, path: &str) -> String {
    let base = base_url.strip_suffix('/').unwrap_or(base_url);
    let url = format!("{}{}", base, path);

    if !path.contains("instance/") && !instance.is_empty() {
        if path.starts_with("/message/") || path.starts_with("/chat/") {
            return format!("{}/{}", url, instance);
        }
        return url;
    }
    if path.contains("instance/connectionState") {
        return url.replacen(
            "connectionState",
            &format!("connectionState/{}", instance),
            1,
        );
    }
    url
}

#[cfg(test)]
mod tests {
    use super::build_url;

    const BASE: &str = "https://x.com/";

    #[test]
    fn message_and_chat_paths_get_instance_suffix() {
        assert_eq!(
            build_url(BASE, "inst1", "/message/sendText"),
            "https://x.com/message/sendText/inst1"
        );
        assert_eq!(
            build_url(BASE, "inst1", "/chat/whatsappProfile"),
            "https://x.com/chat/whatsappProfile/inst1"
        );
    }

    #[test]
    fn connection_state_gets_instance_segment() {
        assert_eq!(
            build_url(BASE, "inst1", "/instance/connectionState"),
            "https://x.com/instance/connectionState/inst1"
        );
    }

    #[test]
    fn other_instance_paths_are_left_alone() {
        assert_eq!(
            build_url(BASE, "inst1", "/instance/fetchInstances"),
            "https://x.com/instance/fetchInstances"
        );
    }

    #[test]
    fn only_one_trailing_slash_is_stripped() {
        assert_eq!(
            build_url("https://x.com//", "inst1", "/message/sendText"),
            "https://x.com//message/sendText/inst1"
        );
        assert_eq!(
            build_url("https://x.com", "inst1", "/message/sendText"),
            "https://x.com/message/sendText/inst1"
        );
    }

    #[test]
    fn unconfigured_instance_skips_suffixing() {
        assert_eq!(
            build_url(BASE, "", "/message/sendText"),
            "https://x.com/message/sendText"
        );
        assert_eq!(
            build_url(BASE, "", "/instance/connectionState"),
            "https://x.com/instance/connectionState/"
        );
    }

    #[test]
    fn unknown_top_level_paths_are_unmodified() {
        assert_eq!(build_url(BASE, "inst1", "/group/create"), "https://x.com/group/create");
    }
}
