// Selects the limb primitive strategy.
//
// `native_x86_64` enables the carry-flag intrinsics and the `div` instruction. It is off for
// other targets and when the `portable` feature asks for the half-limb implementations.

use std::env;

fn main() {
	println!("cargo::rustc-check-cfg=cfg(native_x86_64)");
	println!("cargo::rerun-if-changed=build.rs");

	let arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();
	let portable = env::var_os("CARGO_FEATURE_PORTABLE").is_some();

	if arch == "x86_64" && !portable {
		println!("cargo::rustc-cfg=native_x86_64");
	}
}
