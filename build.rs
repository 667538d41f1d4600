fn main() {
    println!("cargo:rerun-if-env-changed=SMARTHOME_CONFIG_JSON");

    // Firmware builds only; host tests run without the ESP-IDF toolchain.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
