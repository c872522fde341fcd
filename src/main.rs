use premain::{postmain, premain};

#[premain]
fn announce_premain() {
    println!("[*] In premain()");
}

#[postmain]
fn announce_postmain() {
    println!("[*] In postmain()");
}

fn main() {
    println!("[*] In main()");
}
