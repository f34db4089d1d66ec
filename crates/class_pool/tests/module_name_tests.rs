use jpool_class_pool::{read_module_name, ClassPoolError};

const UTF8: u8 = 1;
const MODULE: u8 = 19;

/// Byte-level builder for synthetic `module-info` class files.
struct ModuleInfo {
    major: u16,
    access_flags: u16,
    super_class: u16,
    interfaces_count: u16,
    fields_count: u16,
    methods_count: u16,
    /// (attribute_name_index, body) pairs.
    attributes: Vec<(u16, Vec<u8>)>,
}

impl ModuleInfo {
    /// Well-formed default. Pool layout: 1 = Utf8 "Module",
    /// 2 = Utf8 "com.example.mod", 3 = Module -> 2, 4 = Utf8 "Deprecated".
    fn new() -> Self {
        Self {
            major: 53,
            access_flags: 0x8000,
            super_class: 0,
            interfaces_count: 0,
            fields_count: 0,
            methods_count: 0,
            attributes: vec![(1, module_attribute_body(3))],
        }
    }

    fn build(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend(0xCAFEBABEu32.to_be_bytes());
        buf.extend(0u16.to_be_bytes()); // minor
        buf.extend(self.major.to_be_bytes());

        buf.extend(5u16.to_be_bytes()); // constant_pool_count
        push_utf8(&mut buf, b"Module");
        push_utf8(&mut buf, b"com.example.mod");
        buf.push(MODULE);
        buf.extend(2u16.to_be_bytes());
        push_utf8(&mut buf, b"Deprecated");

        buf.extend(self.access_flags.to_be_bytes());
        buf.extend(3u16.to_be_bytes()); // this_class, unvalidated
        buf.extend(self.super_class.to_be_bytes());
        buf.extend(self.interfaces_count.to_be_bytes());
        buf.extend(self.fields_count.to_be_bytes());
        buf.extend(self.methods_count.to_be_bytes());

        buf.extend((self.attributes.len() as u16).to_be_bytes());
        for (name_index, body) in &self.attributes {
            buf.extend(name_index.to_be_bytes());
            buf.extend((body.len() as u32).to_be_bytes());
            buf.extend_from_slice(body);
        }
        buf
    }
}

fn push_utf8(buf: &mut Vec<u8>, bytes: &[u8]) {
    buf.push(UTF8);
    buf.extend((bytes.len() as u16).to_be_bytes());
    buf.extend_from_slice(bytes);
}

/// A Module attribute body: the module name index followed by the
/// module_flags and module_version_index fields.
fn module_attribute_body(module_index: u16) -> Vec<u8> {
    let mut body = module_index.to_be_bytes().to_vec();
    body.extend(0u16.to_be_bytes());
    body.extend(0u16.to_be_bytes());
    body
}

#[test]
fn test_well_formed_module_info() {
    let buf = ModuleInfo::new().build();
    assert_eq!(read_module_name(&buf).unwrap(), "com.example.mod");
}

#[test]
fn test_module_attribute_after_others() {
    let mut info = ModuleInfo::new();
    info.attributes.insert(0, (4, vec![1, 2, 3, 4, 5]));
    assert_eq!(read_module_name(&info.build()).unwrap(), "com.example.mod");
}

#[test]
fn test_bad_magic() {
    let mut buf = ModuleInfo::new().build();
    buf[0] = 0xCB;
    assert!(matches!(
        read_module_name(&buf),
        Err(ClassPoolError::BadMagic(0xCBFEBABE))
    ));
}

#[test]
fn test_version_below_module_support() {
    let mut info = ModuleInfo::new();
    info.major = 52;
    assert!(matches!(
        read_module_name(&info.build()),
        Err(ClassPoolError::UnsupportedVersion {
            major: 52,
            minor: 0
        })
    ));
}

#[test]
fn test_bad_access_flags() {
    let mut info = ModuleInfo::new();
    info.access_flags = 0x0001;
    assert!(matches!(
        read_module_name(&info.build()),
        Err(ClassPoolError::BadModuleFlags(0x0001))
    ));
}

#[test]
fn test_nonzero_fields_count() {
    let mut info = ModuleInfo::new();
    info.fields_count = 1;
    assert!(matches!(
        read_module_name(&info.build()),
        Err(ClassPoolError::UnexpectedNonZeroCount("fields_count", 1))
    ));
}

#[test]
fn test_nonzero_super_class() {
    let mut info = ModuleInfo::new();
    info.super_class = 3;
    assert!(matches!(
        read_module_name(&info.build()),
        Err(ClassPoolError::UnexpectedNonZeroCount("super_class", 3))
    ));
}

#[test]
fn test_no_module_attribute() {
    let mut info = ModuleInfo::new();
    info.attributes = vec![(4, vec![0; 8]), (4, vec![])];
    assert!(matches!(
        read_module_name(&info.build()),
        Err(ClassPoolError::NoModuleAttribute)
    ));
}

#[test]
fn test_module_attribute_too_short_to_hold_a_name() {
    let mut info = ModuleInfo::new();
    info.attributes = vec![(1, vec![0, 3])];
    assert!(matches!(
        read_module_name(&info.build()),
        Err(ClassPoolError::NoModuleAttribute)
    ));
}

#[test]
fn test_truncated_file() {
    let buf = ModuleInfo::new().build();
    assert!(matches!(
        read_module_name(&buf[..20]),
        Err(ClassPoolError::TruncatedPool { .. })
    ));
}
