use copy_to_output::copy_to_output;
use embed_manifest::{embed_manifest, new_manifest};
use glob::glob;
use std::env;

fn main() {
    let profile = env::var("PROFILE").unwrap();
    copy_to_output("default.yaml", &profile).expect("Could not copy");
    copy_to_output("user.yaml", &profile).expect("Could not copy");
    copy_to_output("data", &profile).expect("Could not copy");
    for asset in glob("data/assets/*.ico").expect("Bad asset pattern").flatten() {
        println!("cargo:rerun-if-changed={}", asset.display());
    }
    if env::var_os("CARGO_CFG_WINDOWS").is_some() {
        embed_manifest(new_manifest("taskbar-bridge")).expect("Could not embed manifest");
    }
}
