fn main() {
    sliding_puzzle::run();
}
