pub mod appstream;
