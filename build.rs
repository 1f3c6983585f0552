fn main() {
    // Emits the ESP-IDF link/cfg environment when building for espidf;
    // a no-op on host targets.
    embuild::espidf::sysenv::output();
}
