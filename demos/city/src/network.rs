//! Built-in downtown road set.
//!
//! A 3 × 3 grid of intersections about 1.1 km apart, loosely laid over a
//! river-front downtown.  Two avenues are one-way, one road carries its own
//! segment lengths, and one row is deliberately unusable so the build report
//! has something to show.

pub const ROADS_CSV: &str = "\
id,name,geometry,length_m,is_oneway
strand,Strand Road,\"LINESTRING(96.150 16.770, 96.160 16.770, 96.170 16.770)\",,false
sule,Sule Pagoda Road,\"LINESTRING(96.160 16.770, 96.160 16.780, 96.160 16.790)\",,true
anawrahta,Anawrahta Road,\"LINESTRING(96.150 16.780, 96.160 16.780, 96.170 16.780)\",,false
pansodan,Pansodan Street,\"96.170,16.790;96.170,16.780;96.170,16.770\",,true
bogyoke,Bogyoke Road,\"LINESTRING(96.150 16.790, 96.160 16.790, 96.170 16.790)\",,false
lanmadaw,Lanmadaw Street,\"LINESTRING(96.150 16.770, 96.150 16.780, 96.1500004 16.790)\",1110;1112,false
stub,,\"LINESTRING(96.180 16.780)\",,false
";
