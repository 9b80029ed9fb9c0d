fn main() {
    // ESP-IDF sysenv is only needed when building the firmware image.
    // Host builds (`cargo test`) skip it entirely.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
