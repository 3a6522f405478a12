use std::{env, fs, path::PathBuf};

fn main() {
    // 1) Handle memory.x and linker scripts for the RP2040 target
    let target = env::var("TARGET").unwrap_or_default();

    if target.starts_with("thumbv6m") {
        let out_dir = PathBuf::from(env::var("OUT_DIR").expect("cargo always sets OUT_DIR"));
        // Pico 1: copy our custom memory-pico1.x to OUT_DIR as memory.x
        let memory_x =
            fs::read_to_string("memory-pico1.x").expect("Failed to read memory-pico1.x");
        let dest = out_dir.join("memory.x");
        fs::write(&dest, memory_x).expect("Failed to write memory.x");
        println!("cargo:rustc-link-search={}", out_dir.display());
        println!("cargo:rerun-if-changed=memory-pico1.x");

        println!("cargo:rustc-link-arg-bins=--nmagic");
        println!("cargo:rustc-link-arg-bins=-Tlink.x");
        println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }

    // 2) Load optional env files (still supported for convenience)
    let _ = dotenvy::from_filename(".env");
    load_home_env(".desk-clock.env");

    // 3) Provide fallbacks so the clock compiles without .env
    let breathe_period = env_or_default("BREATHE_PERIOD_MS", "4000");
    let settle = env_or_default("BUTTON_SETTLE_MS", "10");
    let repeat = env_or_default("BUTTON_REPEAT_MS", "250");

    if breathe_period == "0" {
        println!(
            "cargo:warning=BREATHE_PERIOD_MS=0 selects the unwrapped breathe phase, which drifts over long uptimes"
        );
    }

    // 4) Expose as compile-time constants
    println!("cargo:rustc-env=BREATHE_PERIOD_MS={breathe_period}");
    println!("cargo:rustc-env=BUTTON_SETTLE_MS={settle}");
    println!("cargo:rustc-env=BUTTON_REPEAT_MS={repeat}");

    // Optional: don't rebuild unless these change
    println!("cargo:rerun-if-env-changed=BREATHE_PERIOD_MS");
    println!("cargo:rerun-if-env-changed=BUTTON_SETTLE_MS");
    println!("cargo:rerun-if-env-changed=BUTTON_REPEAT_MS");
    println!("cargo:rerun-if-changed=.env");
}

fn load_home_env(file: &str) {
    let home = match env::var_os("USERPROFILE").or_else(|| env::var_os("HOME")) {
        Some(path) => PathBuf::from(path),
        None => return,
    };
    let path = home.join(file);
    let _ = dotenvy::from_path(&path);
}

fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
