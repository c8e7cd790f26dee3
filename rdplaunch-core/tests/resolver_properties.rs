//! Property-based tests for `FreeRDP` command construction.
//!
//! These tests validate the structural invariants of the produced argument
//! list: the target, user, and password tokens appear exactly once and in a
//! fixed relative order, and the domain token is emitted directly after the
//! username token only when a domain is set.

use std::path::Path;

use proptest::prelude::*;

use rdplaunch_core::models::{AdvancedOptions, AudioMode, Resolution};
use rdplaunch_core::protocol::{LaunchConfig, build_freerdp_args_with_home};

/// Strategy for generating valid hostnames
fn arb_hostname() -> impl Strategy<Value = String> {
    "[a-z0-9]([a-z0-9-]{0,20}[a-z0-9])?(\\.[a-z0-9]{1,10}){0,2}"
}

/// Strategy for generating usernames
fn arb_username() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{0,20}"
}

/// Strategy for generating optional domains
fn arb_domain() -> impl Strategy<Value = Option<String>> {
    prop::option::of("[A-Z][A-Z0-9_]{0,12}")
}

/// Strategy for generating passwords
fn arb_password() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9!@#$%^&*]{1,30}"
}

/// Strategy for generating audio modes
fn arb_audio_mode() -> impl Strategy<Value = AudioMode> {
    prop_oneof![
        Just(AudioMode::Local),
        Just(AudioMode::Remote),
        Just(AudioMode::Disabled),
    ]
}

/// Strategy for generating advanced options
fn arb_options() -> impl Strategy<Value = AdvancedOptions> {
    (
        any::<bool>(),
        prop::sample::select(Resolution::ALL.to_vec()),
        any::<bool>(),
        prop::collection::vec(0u32..8, 0..4),
        any::<[bool; 5]>(),
        any::<bool>(),
        arb_audio_mode(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(
            |(
                fullscreen,
                resolution,
                multimon,
                selected_monitors,
                disables,
                compression,
                audio_mode,
                clipboard,
                redirect_drives,
                nla,
            )| AdvancedOptions {
                fullscreen,
                resolution,
                multimon,
                selected_monitors,
                disable_fonts: disables[0],
                disable_wallpaper: disables[1],
                disable_themes: disables[2],
                disable_aero: disables[3],
                disable_drag: disables[4],
                compression,
                audio_mode,
                clipboard,
                redirect_drives,
                nla,
            },
        )
}

fn build_config(
    host: &str,
    user: &str,
    domain: Option<&str>,
    password: &str,
    options: AdvancedOptions,
) -> LaunchConfig {
    let mut config = LaunchConfig::new(host, user, password).with_options(options);
    if let Some(domain) = domain {
        config = config.with_domain(domain);
    }
    config
}

proptest! {
    #[test]
    fn target_user_password_appear_once_in_fixed_order(
        host in arb_hostname(),
        user in arb_username(),
        domain in arb_domain(),
        password in arb_password(),
        options in arb_options(),
    ) {
        let config = build_config(&host, &user, domain.as_deref(), &password, options);
        let args = build_freerdp_args_with_home(&config, Path::new("/home/tester"));

        let target_token = format!("/v:{host}");
        let user_token = format!("/u:{user}");
        let password_token = format!("/p:{password}");

        prop_assert_eq!(args.iter().filter(|a| **a == target_token).count(), 1);
        prop_assert_eq!(args.iter().filter(|a| a.starts_with("/u:")).count(), 1);
        prop_assert_eq!(args.iter().filter(|a| a.starts_with("/p:")).count(), 1);

        let target_idx = args.iter().position(|a| *a == target_token).unwrap();
        let user_idx = args.iter().position(|a| *a == user_token).unwrap();
        let password_idx = args.iter().position(|a| *a == password_token).unwrap();
        prop_assert!(target_idx < user_idx);
        prop_assert!(user_idx < password_idx);
    }

    #[test]
    fn domain_token_present_iff_domain_set(
        host in arb_hostname(),
        user in arb_username(),
        domain in arb_domain(),
        password in arb_password(),
        options in arb_options(),
    ) {
        let config = build_config(&host, &user, domain.as_deref(), &password, options);
        let args = build_freerdp_args_with_home(&config, Path::new("/home/tester"));

        let user_idx = args.iter().position(|a| a.starts_with("/u:")).unwrap();
        match domain {
            Some(domain) => {
                let domain_token = format!("/d:{domain}");
                prop_assert_eq!(args.iter().filter(|a| **a == domain_token).count(), 1);
                prop_assert_eq!(&args[user_idx + 1], &domain_token);
            }
            None => {
                prop_assert!(!args.iter().any(|a| a.starts_with("/d:")));
            }
        }
    }

    #[test]
    fn exactly_one_display_and_security_token(
        host in arb_hostname(),
        user in arb_username(),
        password in arb_password(),
        options in arb_options(),
    ) {
        let config = build_config(&host, &user, None, &password, options.clone());
        let args = build_freerdp_args_with_home(&config, Path::new("/home/tester"));

        let fullscreen_count = args.iter().filter(|a| **a == "/f").count();
        let size_count = args.iter().filter(|a| a.starts_with("/size:")).count();
        prop_assert_eq!(fullscreen_count + size_count, 1);
        if !options.fullscreen {
            prop_assert_eq!(
                args.iter().filter(|a| **a == format!("/size:{}", options.resolution)).count(),
                1
            );
        }

        prop_assert_eq!(args.iter().filter(|a| a.starts_with("/sec:")).count(), 1);
        prop_assert_eq!(args.iter().filter(|a| **a == "/cert-ignore").count(), 1);
    }

    #[test]
    fn monitor_token_only_with_multimon_and_selection(
        host in arb_hostname(),
        user in arb_username(),
        password in arb_password(),
        options in arb_options(),
    ) {
        let config = build_config(&host, &user, None, &password, options.clone());
        let args = build_freerdp_args_with_home(&config, Path::new("/home/tester"));

        let has_monitors = args.iter().any(|a| a.starts_with("/monitors:"));
        prop_assert_eq!(
            has_monitors,
            options.multimon && !options.selected_monitors.is_empty()
        );
    }
}
