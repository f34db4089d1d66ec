use std::{env, fs::File};

use jpool_class_pool::read_module_name;
use memmap::Mmap;

fn main() {
    pretty_env_logger::init();

    for path in env::args().skip(1) {
        let file = File::open(&path).unwrap();
        let mmap = unsafe { Mmap::map(&file).unwrap() };

        match read_module_name(&mmap) {
            Ok(name) => println!("{}: {}", path, name),
            Err(e) => log::warn!("{}: {}", path, e),
        }
    }
}
