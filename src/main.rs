fn main() {
    ecocode_reviewer::run();
}
