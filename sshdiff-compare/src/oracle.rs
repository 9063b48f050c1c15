//! Remote hash oracle: one `sha1sum` invocation per file, classified from
//! its free-text output.
//!
//! Classification order:
//! 1. output starts with 40 lowercase hex digits and two spaces → `Hash`
//! 2. output ends with `": Permission denied"` → `PermissionDenied`
//! 3. anything else → `NotFound`

use sshdiff_core::{ChannelError, ContentHash, RemoteChannel, RemoteProbeResult};

/// Remote hashing tool; must print `<hex>  <path>` like coreutils.
pub const HASH_TOOL: &str = "sha1sum";

const PERMISSION_DENIED_SUFFIX: &str = ": Permission denied";

/// Escape a path for use inside double quotes.
///
/// Only `"` is escaped. Other shell metacharacters (`$`, backticks, `\`) are
/// passed through unchanged.
pub fn escape_path(path: &str) -> String {
    path.replace('"', "\\\"")
}

/// The exact command issued for `remote_path`, stderr folded into stdout.
pub fn hash_command(remote_path: &str) -> String {
    format!("{HASH_TOOL} \"{}\" 2>&1", escape_path(remote_path))
}

/// Classify raw hash-tool output.
pub fn parse_probe_output(raw: &str) -> RemoteProbeResult {
    if let Some(hash) = leading_hash(raw) {
        return RemoteProbeResult::Hash(hash);
    }
    if raw
        .trim_end_matches(['\r', '\n'])
        .ends_with(PERMISSION_DENIED_SUFFIX)
    {
        return RemoteProbeResult::PermissionDenied;
    }
    RemoteProbeResult::NotFound
}

fn leading_hash(raw: &str) -> Option<ContentHash> {
    let digest = raw.get(..ContentHash::LEN)?;
    if !raw[ContentHash::LEN..].starts_with("  ") {
        return None;
    }
    ContentHash::parse(digest)
}

/// Probe one remote file. Only a broken channel is an error.
pub fn probe(
    channel: &mut dyn RemoteChannel,
    remote_path: &str,
) -> Result<RemoteProbeResult, ChannelError> {
    let command = hash_command(remote_path);
    let raw = channel.run(&command)?;
    let result = parse_probe_output(&raw);
    tracing::debug!("probe {remote_path}: {result:?}");
    Ok(result)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    const DIGEST: &str = "22596363b3de40b06f981fb85d82312e8c0ed511";

    #[test]
    fn escape_only_touches_double_quotes() {
        assert_eq!(escape_path(r#"/a "b" $c`d`\e"#), r#"/a \"b\" $c`d`\e"#);
        assert_eq!(hash_command("/x\"y"), r#"sha1sum "/x\"y" 2>&1"#);
    }

    #[test]
    fn canonical_output_yields_hash() {
        let raw = format!("{DIGEST}  /var/www/index.php\n");
        assert_eq!(
            parse_probe_output(&raw),
            RemoteProbeResult::Hash(ContentHash::parse(DIGEST).unwrap())
        );
    }

    #[rstest]
    #[case("sha1sum: /etc/shadow: Permission denied")]
    #[case("sha1sum: /etc/shadow: Permission denied\n")]
    #[case("sha1sum: /root/a b/c: Permission denied\r\n")]
    fn permission_suffix_yields_denied(#[case] raw: &str) {
        assert_eq!(parse_probe_output(raw), RemoteProbeResult::PermissionDenied);
    }

    #[rstest]
    #[case("")]
    #[case("sha1sum: /nope: No such file or directory\n")]
    #[case("sha1sum: /dir: Is a directory\n")]
    #[case("22596363b3de40b06f981fb85d82312e8c0ed511 /single-space\n")]
    #[case("22596363B3DE40B06F981FB85D82312E8C0ED511  /upper\n")]
    #[case("22596363b3de40b06f981fb85d82312e8c0ed51  /short\n")]
    #[case("Permission denied: at the start only\n")]
    #[case("bash: sha1sum: command not found\n")]
    fn everything_else_is_not_found(#[case] raw: &str) {
        assert_eq!(parse_probe_output(raw), RemoteProbeResult::NotFound);
    }

    #[test]
    fn hash_rule_wins_over_permission_suffix() {
        let raw = format!("{DIGEST}  /odd: Permission denied");
        assert!(matches!(parse_probe_output(&raw), RemoteProbeResult::Hash(_)));
    }

    #[test]
    fn multibyte_output_does_not_panic() {
        assert_eq!(
            parse_probe_output("ééééééééééééééééééééé  x"),
            RemoteProbeResult::NotFound
        );
    }
}
