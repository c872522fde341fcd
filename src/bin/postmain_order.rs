use premain::postmain;

#[postmain(101)]
fn post101() {
    println!("post101");
}

#[postmain(200)]
fn post200() {
    println!("post200");
}

#[postmain]
fn postnone() {
    println!("postnone");
}

fn main() {
    println!("[*] In main()");
}
